//! Lock-free hand-off between the control thread and the audio callback:
//! learn-button presses and reset requests go in, lights and bindings come out.

use atomic_float::AtomicF32;
use cc_learn::{CcInterface, Favourite, Favourites, NUM_SLOTS};
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

pub struct Panel {
    buttons: [AtomicBool; NUM_SLOTS],
    lights: [AtomicF32; NUM_SLOTS],
    bindings: [AtomicU16; NUM_SLOTS],
    reset: AtomicBool,
}

impl Panel {
    pub fn new() -> Self {
        let defaults = Favourites::new();
        Self {
            buttons: std::array::from_fn(|_| AtomicBool::new(false)),
            lights: std::array::from_fn(|_| AtomicF32::new(0.0)),
            bindings: std::array::from_fn(|slot| AtomicU16::new(pack(defaults.get(slot)))),
            reset: AtomicBool::new(false),
        }
    }

    /// Latches a press; the audio thread sees it as one tick at 1.0.
    pub fn press(&self, slot: usize) {
        self.buttons[slot].store(true, Ordering::Release);
    }

    pub fn request_reset(&self) {
        self.reset.store(true, Ordering::Release);
    }

    // ─────────────────────── audio-thread side ─────────────────────────── //

    pub fn take_reset(&self) -> bool {
        self.reset.swap(false, Ordering::AcqRel)
    }

    /// Button levels for this tick. Every latched press is consumed.
    pub fn take_buttons(&self) -> [f32; NUM_SLOTS] {
        std::array::from_fn(|slot| {
            if self.buttons[slot].swap(false, Ordering::AcqRel) {
                1.0
            } else {
                0.0
            }
        })
    }

    pub fn publish(&self, module: &CcInterface) {
        for slot in 0..NUM_SLOTS {
            self.bindings[slot].store(pack(module.favourite(slot)), Ordering::Relaxed);
            self.lights[slot].store(module.light(slot), Ordering::Release);
        }
    }

    // ─────────────────────── control-thread side ───────────────────────── //

    pub fn light(&self, slot: usize) -> f32 {
        self.lights[slot].load(Ordering::Acquire)
    }

    pub fn binding(&self, slot: usize) -> Favourite {
        unpack(self.bindings[slot].load(Ordering::Relaxed))
    }
}

fn pack(favourite: Favourite) -> u16 {
    (u16::from(favourite.channel) << 8) | u16::from(favourite.cc)
}

fn unpack(raw: u16) -> Favourite {
    Favourite::new((raw >> 8) as u8, raw as u8)
}
