//! Normalized rotary position

/// Position of a rotary device in its configured angular range
///
/// Always inside `0.0..=1.0`: every constructor clamps, and NaN becomes 0.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NormalizedValue(f32);

impl NormalizedValue {
    /// Lower end of the range
    pub const MIN: Self = Self(0.0);
    /// Middle of the range (the view's reset position)
    pub const CENTER: Self = Self(0.5);
    /// Upper end of the range
    pub const MAX: Self = Self(1.0);

    /// Create a value, clamping into the unit interval
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self::MIN
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Create a value from a step position out of `steps`
    pub fn from_steps(position: u32, steps: u32) -> Self {
        if steps == 0 {
            return Self::MIN;
        }
        Self::new(position as f32 / steps as f32)
    }

    /// Raw value
    pub const fn get(self) -> f32 {
        self.0
    }

    /// Nearest step position out of `steps`
    pub fn to_steps(self, steps: u32) -> u32 {
        // Non-negative, so truncating after +0.5 rounds half up
        (self.0 * steps as f32 + 0.5) as u32
    }

    /// 7-bit MIDI data value, `round(v * 127)`
    pub fn to_midi(self) -> u8 {
        self.to_steps(127) as u8
    }

    /// Whole percent, `round(v * 100)`
    pub fn to_percent(self) -> u8 {
        self.to_steps(100) as u8
    }
}

impl From<f32> for NormalizedValue {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<NormalizedValue> for f32 {
    fn from(value: NormalizedValue) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        assert_eq!(NormalizedValue::new(-0.5), NormalizedValue::MIN);
        assert_eq!(NormalizedValue::new(1.5), NormalizedValue::MAX);
        assert_eq!(NormalizedValue::new(f32::NAN), NormalizedValue::MIN);
        assert_eq!(NormalizedValue::new(0.25).get(), 0.25);
    }

    #[test]
    fn test_midi_rounding() {
        assert_eq!(NormalizedValue::MIN.to_midi(), 0);
        assert_eq!(NormalizedValue::MAX.to_midi(), 127);
        assert_eq!(NormalizedValue::CENTER.to_midi(), 64);
        assert_eq!(NormalizedValue::new(0.75).to_midi(), 95);
    }

    #[test]
    fn test_percent() {
        assert_eq!(NormalizedValue::CENTER.to_percent(), 50);
        assert_eq!(NormalizedValue::new(0.333).to_percent(), 33);
        assert_eq!(NormalizedValue::MAX.to_percent(), 100);
    }

    #[test]
    fn test_steps_roundtrip() {
        let v = NormalizedValue::from_steps(9, 18);
        assert_eq!(v, NormalizedValue::CENTER);
        assert_eq!(v.to_steps(18), 9);
        assert_eq!(NormalizedValue::from_steps(3, 0), NormalizedValue::MIN);
    }
}
