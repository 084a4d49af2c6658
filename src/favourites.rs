//! The 32 favourite bindings, one per output slot.

use crate::NUM_SLOTS;

/// A (channel, CC number) pair a slot follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Favourite {
    pub channel: u8,
    pub cc: u8,
}

impl Favourite {
    pub const fn new(channel: u8, cc: u8) -> Self {
        Self { channel, cc }
    }
}

/// Index-aligned bindings; every slot is always bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Favourites {
    slots: [Favourite; NUM_SLOTS],
}

impl Favourites {
    /// Slot `i` follows CC `i` on channel 0.
    pub fn new() -> Self {
        let mut favourites = Self {
            slots: [Favourite::default(); NUM_SLOTS],
        };
        favourites.reset();
        favourites
    }

    pub fn reset(&mut self) {
        for (slot, favourite) in self.slots.iter_mut().enumerate() {
            *favourite = Favourite::new(0, slot as u8);
        }
    }

    /// Panics if `slot >= NUM_SLOTS`.
    pub fn get(&self, slot: usize) -> Favourite {
        self.slots[slot]
    }

    pub fn set(&mut self, slot: usize, channel: u8, cc: u8) {
        self.slots[slot] = Favourite::new(channel, cc);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Favourite> {
        self.slots.iter()
    }
}

impl Default for Favourites {
    fn default() -> Self {
        Self::new()
    }
}
