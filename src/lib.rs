//! MIDI Control-Change learn core: caches the last value of every CC, binds 32
//! favourite slots to (channel, CC) pairs with a learn gesture and resolves the
//! bound values into 0–10 V style outputs once per tick.

mod favourites;
mod interface;
mod learn;
mod message;
mod table;
mod trigger;

pub use favourites::{Favourite, Favourites};
pub use interface::{CcInterface, LIGHT_ARMED, LIGHT_LEARNED, LIGHT_OFF};
pub use learn::LearnState;
pub use message::{CONTROL_CHANGE, MidiMessage};
pub use table::CcTable;
pub use trigger::SchmittTrigger;

/// Number of favourite slots (outputs, learn buttons and lights).
pub const NUM_SLOTS: usize = 32;
pub const NUM_CHANNELS: usize = 16;
pub const NUM_CCS: usize = 128;
