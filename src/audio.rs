//! Drives the core from a CPAL output stream: every audio callback is one tick
//! and the 32 outputs leave as DC levels on the interface's output channels,
//! for DC-coupled interfaces patched into a modular rig.

use anyhow::{Context, Result, bail};
use cc_learn::{CcInterface, MidiMessage, NUM_SLOTS};
use cpal::{
    BufferSize, FromSample, HostId, SampleFormat, SizedSample, Stream, StreamConfig, host_from_id,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use std::sync::{Arc, mpsc::Receiver};

use crate::{config::Config, panel::Panel};

pub struct AudioEngine {
    _stream: Stream,
}

impl AudioEngine {
    pub fn start(rx: Receiver<MidiMessage>, panel: Arc<Panel>, cfg: &Config) -> Result<Self> {
        // Prefer JACK; fall back to default host.
        let host = host_from_id(HostId::Jack).unwrap_or_else(|_| cpal::default_host());
        let device = host
            .default_output_device()
            .context("no default output device")?;

        let def_cfg = device.default_output_config()?;
        let sample_format = def_cfg.sample_format();
        let mut stream_cfg: StreamConfig = def_cfg.into();
        stream_cfg.buffer_size = BufferSize::Fixed(cfg.frames);

        let routed = usize::from(stream_cfg.channels).min(NUM_SLOTS);
        log::info!(
            "🔌 {} output channels, routing slots 0..{routed} at {} frames/tick",
            stream_cfg.channels,
            cfg.frames
        );
        let tick = Tick::new(rx, panel, cfg.full_scale, routed);

        let stream = match sample_format {
            SampleFormat::F32 => Self::run::<f32>(&device, &stream_cfg, tick)?,
            SampleFormat::I16 => Self::run::<i16>(&device, &stream_cfg, tick)?,
            SampleFormat::U16 => Self::run::<u16>(&device, &stream_cfg, tick)?,
            other => bail!("unsupported sample format {other:?}"),
        };

        stream.play()?;
        Ok(Self { _stream: stream })
    }

    fn run<T>(device: &cpal::Device, cfg: &StreamConfig, mut tick: Tick) -> Result<Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = usize::from(cfg.channels);

        let err_fn = |e| log::error!("audio stream error: {e}");
        let stream = device.build_output_stream(
            cfg,
            move |output: &mut [T], _| fill(output, channels, tick.run()),
            err_fn,
            None,
        )?;
        Ok(stream)
    }
}

// ───────────────────────────── helpers ─────────────────────────────────── //

/// Writes `levels` as DC onto the first channels of every frame; channels
/// past the routed slots sit at the format's equilibrium.
fn fill<T>(output: &mut [T], channels: usize, levels: &[f32])
where
    T: SizedSample + FromSample<f32>,
{
    for frame in output.chunks_mut(channels) {
        for (sample, &level) in frame.iter_mut().zip(levels) {
            *sample = T::from_sample(level);
        }
        for sample in frame.iter_mut().skip(levels.len()) {
            *sample = T::EQUILIBRIUM;
        }
    }
}

/// State moved into the audio callback.
struct Tick {
    module: CcInterface,
    rx: Receiver<MidiMessage>,
    panel: Arc<Panel>,
    full_scale: f32,
    levels: [f32; NUM_SLOTS],
    routed: usize,
}

impl Tick {
    fn new(rx: Receiver<MidiMessage>, panel: Arc<Panel>, full_scale: f32, routed: usize) -> Self {
        Self {
            module: CcInterface::new(),
            rx,
            panel,
            full_scale,
            levels: [0.0; NUM_SLOTS],
            routed,
        }
    }

    /// One processing step; returns the DC level of each routed slot.
    fn run(&mut self) -> &[f32] {
        if self.panel.take_reset() {
            self.module.reset();
        }
        let buttons = self.panel.take_buttons();
        self.module.step(self.rx.try_iter(), &buttons);
        self.panel.publish(&self.module);

        for (level, &volts) in self.levels.iter_mut().zip(self.module.outputs()) {
            *level = (volts / self.full_scale).clamp(-1.0, 1.0);
        }
        &self.levels[..self.routed]
    }
}
