//! Edge detector for the momentary learn buttons.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Level {
    /// No level at or beyond a threshold seen yet.
    #[default]
    Unknown,
    Low,
    High,
}

/// Fires once when the input reaches 1.0 from a known low state and re-arms
/// only after it falls back to 0.0, so a held button produces a single
/// trigger. A button already held on the first sample never fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchmittTrigger {
    level: Level,
}

impl SchmittTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` on the rising edge only.
    pub fn process(&mut self, input: f32) -> bool {
        match self.level {
            Level::Low if input >= 1.0 => {
                self.level = Level::High;
                return true;
            }
            Level::High if input <= 0.0 => self.level = Level::Low,
            Level::Unknown if input >= 1.0 => self.level = Level::High,
            Level::Unknown if input <= 0.0 => self.level = Level::Low,
            _ => {}
        }
        false
    }
}
