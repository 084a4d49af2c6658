//! Feeds Control-Change messages from MIDI input ports into the tick queue.

use anyhow::{Result, anyhow, bail};
use cc_learn::MidiMessage;
use midir::{Ignore, MidiInput, MidiInputConnection, MidiInputPort};
use std::sync::mpsc::Sender;

use crate::config::Config;

const CLIENT_NAME: &str = "cc-learn";

pub struct MidiRouter {
    _conn: MidiInputConnection<()>, // RAII – stays alive
}

impl MidiRouter {
    pub fn connect(port: &MidiInputPort, tx: Sender<MidiMessage>) -> Result<Self> {
        let mut midi_in = MidiInput::new(CLIENT_NAME)?;
        midi_in.ignore(Ignore::All);

        let name = midi_in.port_name(port)?;
        let conn = midi_in
            .connect(
                port,
                CLIENT_NAME,
                move |_stamp, bytes, _| {
                    if let Some(msg) = forwardable(bytes) {
                        // receiver gone means we are shutting down
                        tx.send(msg).ok();
                    }
                },
                (),
            )
            .map_err(|e| anyhow!("connect {name}: {e}"))?;

        log::info!("🎛 Listening to {name}");
        Ok(Self { _conn: conn })
    }
}

/// Connects every input port accepted by `cfg`. Fails only if none connect.
pub fn connect_all(cfg: &Config, tx: &Sender<MidiMessage>) -> Result<Vec<MidiRouter>> {
    let scan = MidiInput::new(CLIENT_NAME)?;
    let mut routers = Vec::new();

    for port in scan.ports() {
        let Ok(name) = scan.port_name(&port) else {
            continue;
        };
        if !cfg.accepts_port(&name) {
            log::debug!("Skipping MIDI port {name}");
            continue;
        }
        match MidiRouter::connect(&port, tx.clone()) {
            Ok(router) => routers.push(router),
            Err(e) => log::warn!("Failed to connect to {name}: {e:#}"),
        }
    }

    if routers.is_empty() {
        bail!("no MIDI input port matches {:?}", cfg.port_filter);
    }
    Ok(routers)
}

// ─────────────────── helpers ─────────────────────────────────────────────────

/// Only Control-Change reaches the queue; the core would ignore the rest.
fn forwardable(bytes: &[u8]) -> Option<MidiMessage> {
    let msg = MidiMessage::from_bytes(bytes)?;
    if msg.is_control_change() {
        log::trace!("CC ch{} #{} = {}", msg.channel(), msg.note(), msg.value());
        Some(msg)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_control_change_only() {
        assert_eq!(
            forwardable(&[0xB3, 7, 100]),
            Some(MidiMessage::control_change(3, 7, 100))
        );
        assert_eq!(forwardable(&[0x93, 60, 100]), None);
        assert_eq!(forwardable(&[0xFE]), None);
        assert_eq!(forwardable(&[]), None);
    }
}
