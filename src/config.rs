//! Startup configuration, read from `CC_LEARN_*` environment variables.

use anyhow::{Context, Result, bail};
use std::{str::FromStr, time::Duration};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Lower-cased substring matched against MIDI input port names.
    pub port_filter: String,
    pub frames: u32,
    /// Volts represented by a ±1.0 DC sample.
    pub full_scale: f32,
    pub jackd: Option<Vec<String>>,
    pub jack_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port_filter: String::new(),
            frames: 32,
            full_scale: 10.0,
            jackd: None,
            jack_timeout: Duration::from_millis(5000),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(filter) = lookup("CC_LEARN_PORT") {
            cfg.port_filter = filter.trim().to_lowercase();
        }
        if let Some(frames) = parse::<u32, _>(&lookup, "CC_LEARN_FRAMES")? {
            if frames == 0 {
                bail!("CC_LEARN_FRAMES must be at least 1");
            }
            cfg.frames = frames;
        }
        if let Some(full_scale) = parse::<f32, _>(&lookup, "CC_LEARN_FULL_SCALE")? {
            if !(full_scale.is_finite() && full_scale > 0.0) {
                bail!("CC_LEARN_FULL_SCALE must be a positive number, got {full_scale}");
            }
            cfg.full_scale = full_scale;
        }
        if let Some(cmd) = lookup("CC_LEARN_JACKD") {
            let argv: Vec<String> = cmd.split_whitespace().map(str::to_owned).collect();
            if argv.is_empty() {
                bail!("CC_LEARN_JACKD is set but empty");
            }
            cfg.jackd = Some(argv);
        }
        if let Some(ms) = parse::<u64, _>(&lookup, "CC_LEARN_JACK_TIMEOUT_MS")? {
            cfg.jack_timeout = Duration::from_millis(ms);
        }

        Ok(cfg)
    }

    pub fn accepts_port(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.port_filter)
    }
}

fn parse<T, L>(lookup: &L, key: &str) -> Result<Option<T>>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .with_context(|| format!("invalid {key}: {raw:?}"))
        })
        .transpose()
}
