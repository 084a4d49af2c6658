//! Last-seen value of every (channel, CC) pair.

use crate::{NUM_CCS, NUM_CHANNELS};

/// Flat `16 × 128` store of signed CC values, zeroed on creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CcTable {
    values: [[i8; NUM_CCS]; NUM_CHANNELS],
}

impl CcTable {
    pub fn new() -> Self {
        Self {
            values: [[0; NUM_CCS]; NUM_CHANNELS],
        }
    }

    /// Channel and CC are masked to their MIDI field widths (4 and 7 bits).
    pub fn get(&self, channel: u8, cc: u8) -> i8 {
        self.values[usize::from(channel & 0x0F)][usize::from(cc & 0x7F)]
    }

    pub fn set(&mut self, channel: u8, cc: u8, value: i8) {
        self.values[usize::from(channel & 0x0F)][usize::from(cc & 0x7F)] = value;
    }

    pub fn clear(&mut self) {
        for row in self.values.iter_mut() {
            row.fill(0);
        }
    }
}

impl Default for CcTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let table = CcTable::new();
        for channel in 0..NUM_CHANNELS as u8 {
            for cc in 0..NUM_CCS as u8 {
                assert_eq!(table.get(channel, cc), 0);
            }
        }
    }

    #[test]
    fn set_overwrites_only_its_cell() {
        let mut table = CcTable::new();
        table.set(2, 64, 100);
        table.set(2, 64, -3);
        assert_eq!(table.get(2, 64), -3);
        assert_eq!(table.get(2, 63), 0);
        assert_eq!(table.get(3, 64), 0);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut table = CcTable::new();
        table.set(15, 127, 42);
        table.set(0, 0, -1);
        table.clear();
        assert_eq!(table, CcTable::new());
    }
}
