use anyhow::{Context, Result, anyhow};
use jack::{Client, ClientOptions};
use std::{
    process::{Command, Stdio},
    thread::sleep,
    time::{Duration, Instant},
};

/// A throw-away client that must not start a server itself.
/// Success ⇒ server is up and ready to accept clients.
fn jack_is_running() -> bool {
    Client::new("cc-learn-probe", ClientOptions::NO_START_SERVER).is_ok()
}

/// Spawn `argv` detached; JACK's startup chatter goes to /dev/null.
fn spawn_jackd(argv: &[String]) -> Result<()> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow!("empty jackd command"))?;
    log::info!("Starting JACK server: {}", argv.join(" "));

    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to spawn {program}"))?;

    Ok(())
}

/// Ensure a JACK server is running. If not, launch `argv` and wait until it
/// answers (or bail after `timeout`).
pub fn ensure_jack_running(argv: &[String], timeout: Duration) -> Result<()> {
    if jack_is_running() {
        log::info!("JACK server is already running.");
        return Ok(());
    }

    spawn_jackd(argv)?;
    let start = Instant::now();

    loop {
        log::debug!("Waiting for JACK server...");
        if jack_is_running() {
            log::info!("JACK server ready after {:?}", start.elapsed());
            return Ok(());
        }
        if start.elapsed() > timeout {
            return Err(anyhow!("JACK did not start within {timeout:?}"));
        }
        sleep(Duration::from_millis(100));
    }
}
