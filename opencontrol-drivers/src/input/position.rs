//! Encoder position tracking
//!
//! Position is kept in decoder ticks, clamped to the configured angular
//! range. `ticks_per_event` ticks form one step; a turn is only reported
//! when the step changes. Ticks are 64-bit so any accepted tuning fits.

use opencontrol_core::{EncoderDef, NormalizedValue};

use super::quadrature::Step;

#[derive(Debug, Clone)]
pub struct EncoderPosition {
    ticks: i64,
    ticks_per_step: i64,
    steps: u32,
    invert: bool,
}

impl EncoderPosition {
    /// Tracker for `def`'s tuning, starting at the bottom of the range
    pub fn new(def: &EncoderDef) -> Self {
        Self {
            ticks: 0,
            ticks_per_step: i64::from(def.ticks_per_event.max(1)),
            steps: def.steps_in_range(),
            invert: def.invert,
        }
    }

    /// Steps spanning the full range
    pub fn steps(&self) -> u32 {
        self.steps
    }

    fn max_ticks(&self) -> i64 {
        i64::from(self.steps) * self.ticks_per_step
    }

    fn step_index(&self) -> u32 {
        (self.ticks / self.ticks_per_step) as u32
    }

    pub fn value(&self) -> NormalizedValue {
        NormalizedValue::from_steps(self.step_index(), self.steps)
    }

    /// Apply one decoded step
    ///
    /// Returns the new value if the position moved to another step.
    pub fn apply(&mut self, step: Step) -> Option<NormalizedValue> {
        let before = self.step_index();
        self.ticks = (self.ticks + i64::from(step.delta(self.invert))).clamp(0, self.max_ticks());

        (self.step_index() != before).then(|| self.value())
    }

    /// Overwrite the position from a normalized value
    pub fn force(&mut self, value: NormalizedValue) {
        self.ticks = i64::from(value.to_steps(self.steps).min(self.steps)) * self.ticks_per_step;
    }
}
