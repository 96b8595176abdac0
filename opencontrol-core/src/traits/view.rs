//! View sink trait

use crate::value::NormalizedValue;

/// Visual state driven by the binding layer
///
/// Slots are the registry indices of the devices. Implementations must
/// ignore slots beyond their capacity rather than fail.
pub trait ViewSink {
    /// Value every analog slot returns to on reset
    fn default_value(&self) -> NormalizedValue {
        NormalizedValue::CENTER
    }

    /// Number of analog (encoder) slots
    fn analog_capacity(&self) -> usize;

    /// Number of boolean (button) slots
    fn boolean_capacity(&self) -> usize;

    /// Show a new encoder value
    fn set_analog(&mut self, slot: usize, value: NormalizedValue);

    /// Show a button state
    fn set_boolean(&mut self, slot: usize, pressed: bool);

    /// Redraw every analog slot at [`ViewSink::default_value`]
    fn reset_all_analog(&mut self);

    /// Push pending changes to the display
    ///
    /// Runs as the scheduler's slow activity.
    fn refresh(&mut self);
}
