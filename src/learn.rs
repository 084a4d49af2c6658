//! Which slot, if any, is waiting to capture the next CC.

use crate::NUM_SLOTS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LearnState {
    #[default]
    Idle,
    /// The slot binds to the next CC whose value differs from the cached one.
    Armed(usize),
}

impl LearnState {
    /// Arms `slot`, returning the slot it supersedes (if any).
    pub fn arm(&mut self, slot: usize) -> Option<usize> {
        debug_assert!(slot < NUM_SLOTS);
        let previous = self.armed();
        *self = LearnState::Armed(slot);
        previous
    }

    pub fn armed(&self) -> Option<usize> {
        match *self {
            LearnState::Idle => None,
            LearnState::Armed(slot) => Some(slot),
        }
    }

    /// Leaves learn mode, returning the slot that was armed.
    pub fn complete(&mut self) -> Option<usize> {
        let slot = self.armed();
        *self = LearnState::Idle;
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_supersedes_previous_slot() {
        let mut state = LearnState::default();
        assert_eq!(state.arm(3), None);
        assert_eq!(state.arm(7), Some(3));
        assert_eq!(state, LearnState::Armed(7));
    }

    #[test]
    fn complete_returns_to_idle() {
        let mut state = LearnState::Armed(5);
        assert_eq!(state.complete(), Some(5));
        assert_eq!(state, LearnState::Idle);
        assert_eq!(state.complete(), None);
    }
}
