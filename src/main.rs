mod audio;
mod config;
mod jack_boot;
mod midi;
mod panel;

use anyhow::{Context, Result};
use cc_learn::{LIGHT_ARMED, LIGHT_LEARNED, NUM_SLOTS};
use env_logger::Env;
use std::{
    io::{self, BufRead, Write},
    sync::{Arc, mpsc::channel},
    thread,
    time::Duration,
};

use crate::{config::Config, panel::Panel};

const WATCH_INTERVAL: Duration = Duration::from_millis(20);

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cfg = Config::from_env()?;
    log::debug!("{cfg:?}");

    if let Some(argv) = &cfg.jackd {
        jack_boot::ensure_jack_running(argv, cfg.jack_timeout)?;
    }

    // pipeline: MIDI → queue → tick (audio callback) → DC outputs
    let (tx, rx) = channel();
    let panel = Arc::new(Panel::new());

    let _audio = audio::AudioEngine::start(rx, panel.clone(), &cfg)?;
    let _routers = midi::connect_all(&cfg, &tx)?;

    let watcher = panel.clone();
    thread::spawn(move || watch_lights(&watcher));

    log::info!("Type a slot (0-{}) to learn, `list`, `reset` or `quit`", NUM_SLOTS - 1);
    if control_loop(io::stdin().lock(), &panel)? {
        return Ok(());
    }

    // stdin closed: keep the stream running until the process is killed
    log::info!("stdin closed, running headless");
    loop {
        thread::park();
    }
}

/// Handles commands until `quit` (returns `true`) or end of input (`false`).
fn control_loop(input: impl BufRead, panel: &Panel) -> Result<bool> {
    for line in input.lines() {
        let line = line.context("read stdin")?;
        match line.trim() {
            "" => {}
            "quit" | "exit" => return Ok(true),
            "reset" => {
                panel.request_reset();
                log::info!("↺ Reset requested");
            }
            "list" => list(panel)?,
            other => match other.parse::<usize>() {
                Ok(slot) if slot < NUM_SLOTS => panel.press(slot),
                _ => log::warn!("Unknown command {other:?}"),
            },
        }
    }
    Ok(false)
}

fn list(panel: &Panel) -> Result<()> {
    let mut out = io::stdout().lock();
    for slot in 0..NUM_SLOTS {
        let fav = panel.binding(slot);
        writeln!(
            out,
            "{slot:>2}: ch {:>2} cc {:>3} {}",
            fav.channel,
            fav.cc,
            light_label(panel.light(slot))
        )?;
    }
    Ok(())
}

/// Logs arm/learn transitions as the audio thread publishes them.
fn watch_lights(panel: &Panel) {
    let mut seen = [0.0f32; NUM_SLOTS];
    loop {
        for (slot, last) in seen.iter_mut().enumerate() {
            let light = panel.light(slot);
            if light == *last {
                continue;
            }
            if light == LIGHT_ARMED {
                log::info!("🎯 Slot {slot} armed, move a controller");
            } else if light == LIGHT_LEARNED {
                let fav = panel.binding(slot);
                log::info!("✅ Slot {slot} learned ch {} cc {}", fav.channel, fav.cc);
            }
            *last = light;
        }
        thread::sleep(WATCH_INTERVAL);
    }
}

fn light_label(light: f32) -> &'static str {
    if light == LIGHT_ARMED {
        "[learning]"
    } else if light == LIGHT_LEARNED {
        "[learned]"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_input_is_not_quit() {
        let panel = Panel::new();
        assert!(!control_loop("".as_bytes(), &panel).unwrap());
        assert!(!control_loop("reset\n12\n".as_bytes(), &panel).unwrap());
        assert!(control_loop("3\nquit\n7\n".as_bytes(), &panel).unwrap());
    }

    #[test]
    fn commands_reach_the_panel() {
        let panel = Panel::new();
        control_loop("bogus\n40\n5\nreset\n".as_bytes(), &panel).unwrap();
        assert!(panel.take_reset());
        let levels = panel.take_buttons();
        assert_eq!(levels[5], 1.0);
        assert_eq!(levels.iter().sum::<f32>(), 1.0);
    }
}
