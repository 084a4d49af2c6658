//! Message ingestion and the per-tick resolver tying the table, the bindings
//! and the learn state together.

use crate::{
    CcTable, Favourite, Favourites, LearnState, MidiMessage, NUM_SLOTS, SchmittTrigger,
};

pub const LIGHT_OFF: f32 = 0.0;
pub const LIGHT_ARMED: f32 = 1.0;
/// Dimmed indicator left on a slot that just learned a CC.
pub const LIGHT_LEARNED: f32 = 0.2;

/// Output value of a full-scale (127) CC.
const FULL_SCALE: f32 = 10.0;

/// One module instance: owns every piece of state and is driven by
/// [`CcInterface::step`] once per processing cycle.
#[derive(Clone, Debug)]
pub struct CcInterface {
    table: CcTable,
    favourites: Favourites,
    learn: LearnState,
    triggers: [SchmittTrigger; NUM_SLOTS],
    lights: [f32; NUM_SLOTS],
    outputs: [f32; NUM_SLOTS],
}

impl CcInterface {
    pub fn new() -> Self {
        Self {
            table: CcTable::new(),
            favourites: Favourites::new(),
            learn: LearnState::Idle,
            triggers: [SchmittTrigger::new(); NUM_SLOTS],
            lights: [LIGHT_OFF; NUM_SLOTS],
            outputs: [0.0; NUM_SLOTS],
        }
    }

    /// Zeroes the table, restores default bindings and leaves learn mode.
    /// Button triggers keep their state so a held button does not re-fire.
    pub fn reset(&mut self) {
        self.table.clear();
        self.favourites.reset();
        self.learn = LearnState::Idle;
        self.lights = [LIGHT_OFF; NUM_SLOTS];
        self.outputs = [0.0; NUM_SLOTS];
    }

    /// Ingests one message. Anything but Control-Change is ignored.
    pub fn process_message(&mut self, msg: MidiMessage) {
        if !msg.is_control_change() {
            return;
        }
        let channel = msg.channel();
        let cc = msg.note();
        let value = msg.value();

        // Only a value that moved completes learning, so a controller
        // replaying its current position is not captured.
        if let Some(slot) = self.learn.armed() {
            if self.table.get(channel, cc) != value {
                self.favourites.set(slot, channel, cc);
                self.lights[slot] = LIGHT_LEARNED;
                self.learn.complete();
            }
        }

        self.table.set(channel, cc, value);
    }

    /// Runs one tick: drains `messages` in order, handles learn-button
    /// edges (`buttons[i]` is the level of slot `i`'s button, 0.0 or 1.0)
    /// and recomputes every output.
    pub fn step<I>(&mut self, messages: I, buttons: &[f32; NUM_SLOTS])
    where
        I: IntoIterator<Item = MidiMessage>,
    {
        for msg in messages {
            self.process_message(msg);
        }

        for (slot, (trigger, &level)) in self.triggers.iter_mut().zip(buttons).enumerate() {
            if trigger.process(level) {
                if let Some(previous) = self.learn.arm(slot) {
                    self.lights[previous] = LIGHT_OFF;
                }
                self.lights[slot] = LIGHT_ARMED;
            }
        }

        for (output, favourite) in self.outputs.iter_mut().zip(self.favourites.iter()) {
            *output = rescale(self.table.get(favourite.channel, favourite.cc));
        }
    }

    pub fn output(&self, slot: usize) -> f32 {
        self.outputs[slot]
    }

    pub fn outputs(&self) -> &[f32; NUM_SLOTS] {
        &self.outputs
    }

    pub fn light(&self, slot: usize) -> f32 {
        self.lights[slot]
    }

    pub fn lights(&self) -> &[f32; NUM_SLOTS] {
        &self.lights
    }

    pub fn favourite(&self, slot: usize) -> Favourite {
        self.favourites.get(slot)
    }

    pub fn learn_state(&self) -> LearnState {
        self.learn
    }

    pub fn cc_value(&self, channel: u8, cc: u8) -> i8 {
        self.table.get(channel, cc)
    }
}

impl Default for CcInterface {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────── helpers ─────────────────────────────────── //

/// Clamps to ±127 first, then maps 0..127 onto 0..10 without clamping the
/// result, so negative values stay negative.
fn rescale(value: i8) -> f32 {
    f32::from(value.clamp(-127, 127)) / 127.0 * FULL_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const NO_MESSAGES: [MidiMessage; 0] = [];
    const RELEASED: [f32; NUM_SLOTS] = [0.0; NUM_SLOTS];

    /// A module whose button triggers have seen one released tick.
    fn settled() -> CcInterface {
        let mut module = CcInterface::new();
        module.step(NO_MESSAGES, &RELEASED);
        module
    }

    fn pressed(slot: usize) -> [f32; NUM_SLOTS] {
        let mut buttons = RELEASED;
        buttons[slot] = 1.0;
        buttons
    }

    #[test]
    fn rescale_is_affine_after_clamp() {
        assert_abs_diff_eq!(rescale(127), 10.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rescale(0), 0.0);
        assert_abs_diff_eq!(rescale(-50), -3.937_008, epsilon = 1e-5);
        assert_abs_diff_eq!(rescale(-128), -10.0, epsilon = 1e-6);
    }

    #[test]
    fn held_button_arms_once() {
        let mut module = settled();
        module.step(NO_MESSAGES, &pressed(4));
        assert_eq!(module.learn_state(), LearnState::Armed(4));

        // learn completes while the button is still held
        module.step([MidiMessage::control_change(1, 20, 5)], &pressed(4));
        assert_eq!(module.learn_state(), LearnState::Idle);
        assert_eq!(module.favourite(4), Favourite::new(1, 20));

        module.step(NO_MESSAGES, &pressed(4));
        assert_eq!(module.learn_state(), LearnState::Idle);
        assert_eq!(module.light(4), LIGHT_LEARNED);
    }

    #[test]
    fn button_held_at_startup_does_not_arm() {
        let mut module = CcInterface::new();
        module.step(NO_MESSAGES, &pressed(4));
        module.step(NO_MESSAGES, &pressed(4));
        assert_eq!(module.learn_state(), LearnState::Idle);
        assert_eq!(module.light(4), LIGHT_OFF);

        module.step(NO_MESSAGES, &RELEASED);
        module.step(NO_MESSAGES, &pressed(4));
        assert_eq!(module.learn_state(), LearnState::Armed(4));
    }

    #[test]
    fn higher_slot_wins_simultaneous_presses() {
        let mut module = settled();
        let mut buttons = RELEASED;
        buttons[2] = 1.0;
        buttons[9] = 1.0;
        module.step(NO_MESSAGES, &buttons);

        assert_eq!(module.learn_state(), LearnState::Armed(9));
        assert_eq!(module.light(2), LIGHT_OFF);
        assert_eq!(module.light(9), LIGHT_ARMED);
    }

    #[test]
    fn messages_are_drained_before_buttons() {
        let mut module = settled();
        // the message arrives in the same tick as the press, so it is
        // ingested while still idle and cannot complete the learn
        module.step([MidiMessage::control_change(0, 50, 90)], &pressed(1));
        assert_eq!(module.learn_state(), LearnState::Armed(1));
        assert_eq!(module.favourite(1), Favourite::new(0, 1));
        assert_eq!(module.cc_value(0, 50), 90);
    }

    #[test]
    fn learned_slot_follows_new_binding() {
        let mut module = settled();
        module.step(NO_MESSAGES, &pressed(0));
        module.step([MidiMessage::control_change(3, 7, 127)], &RELEASED);

        assert_eq!(module.favourite(0), Favourite::new(3, 7));
        assert_abs_diff_eq!(module.output(0), 10.0, epsilon = 1e-6);
        // slot 7 still follows (0, 7), which is untouched
        assert_abs_diff_eq!(module.output(7), 0.0);
    }

    #[test]
    fn reset_turns_lights_off() {
        let mut module = settled();
        module.step(NO_MESSAGES, &pressed(6));
        module.reset();
        assert!(module.lights().iter().all(|&light| light == LIGHT_OFF));
        assert_eq!(module.learn_state(), LearnState::Idle);
    }
}
