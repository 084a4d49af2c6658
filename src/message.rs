//! Raw channel-voice MIDI message as delivered to the core.

/// Status nibble of a Control-Change message.
pub const CONTROL_CHANGE: u8 = 0xB;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MidiMessage {
    /// Full status byte (`0x80..=0xEF`).
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

impl MidiMessage {
    pub const fn new(status: u8, data1: u8, data2: u8) -> Self {
        Self {
            status,
            data1,
            data2,
        }
    }

    /// `value` is sent as its raw byte, so negatives set the 8th bit.
    pub const fn control_change(channel: u8, cc: u8, value: i8) -> Self {
        Self::new((CONTROL_CHANGE << 4) | (channel & 0x0F), cc, value as u8)
    }

    /// High nibble of the status byte.
    pub const fn status(&self) -> u8 {
        self.status >> 4
    }

    pub const fn channel(&self) -> u8 {
        self.status & 0x0F
    }

    /// First data byte: the controller number of a CC message.
    pub const fn note(&self) -> u8 {
        self.data1
    }

    /// Second data byte read as signed, so a set 8th bit reads negative.
    pub const fn value(&self) -> i8 {
        self.data2 as i8
    }

    pub const fn is_control_change(&self) -> bool {
        self.status() == CONTROL_CHANGE
    }

    /// Decodes one message from a midir callback buffer. System messages
    /// (SysEx, clock, ...) and stray data bytes yield `None`; missing data
    /// bytes read as zero.
    pub fn from_bytes(msg: &[u8]) -> Option<Self> {
        let (&status, data) = msg.split_first()?;
        if !(0x80..0xF0).contains(&status) {
            return None;
        }
        let data1 = data.first().copied().unwrap_or(0);
        let data2 = data.get(1).copied().unwrap_or(0);
        Some(Self::new(status, data1, data2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_control_change() {
        let msg = MidiMessage::from_bytes(&[0xB2, 64, 100]).unwrap();
        assert!(msg.is_control_change());
        assert_eq!(msg.channel(), 2);
        assert_eq!(msg.note(), 64);
        assert_eq!(msg.value(), 100);
    }

    #[test]
    fn rejects_system_and_data_bytes() {
        assert_eq!(MidiMessage::from_bytes(&[]), None);
        assert_eq!(MidiMessage::from_bytes(&[0xF0, 0x7E, 0xF7]), None);
        assert_eq!(MidiMessage::from_bytes(&[0xF8]), None);
        assert_eq!(MidiMessage::from_bytes(&[0x40, 0x7F]), None);
    }

    #[test]
    fn short_messages_pad_with_zero() {
        let msg = MidiMessage::from_bytes(&[0xC5, 12]).unwrap();
        assert_eq!(msg.status(), 0xC);
        assert_eq!(msg.channel(), 5);
        assert_eq!((msg.data1, msg.data2), (12, 0));
    }

    #[test]
    fn high_bit_reads_negative() {
        let msg = MidiMessage::control_change(0, 10, -50);
        assert_eq!(msg.data2, 206);
        assert_eq!(msg.value(), -50);
    }
}
