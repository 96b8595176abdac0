//! Input source trait

use crate::config::DeviceId;
use crate::value::NormalizedValue;

/// Event reported by an input source for a subscribed device
///
/// `slot` is the value handed over at subscription time and is echoed
/// back unchanged, so the subscriber never has to look the device up.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Rotary device moved to a new position
    Turned {
        slot: usize,
        value: NormalizedValue,
    },
    /// Momentary device became active
    Pressed { slot: usize },
    /// Momentary device became inactive
    Released { slot: usize },
}

/// Source of encoder and button events
///
/// Subscriptions are made once at startup. Events for devices without a
/// matching subscription are never reported. The order of events that
/// become ready during the same update is decided by the implementation.
pub trait InputSource {
    /// Report [`InputEvent::Turned`] for this encoder
    fn subscribe_turned(&mut self, device: DeviceId, slot: usize);

    /// Report [`InputEvent::Pressed`] for this button
    fn subscribe_pressed(&mut self, device: DeviceId, slot: usize);

    /// Report [`InputEvent::Released`] for this button
    fn subscribe_released(&mut self, device: DeviceId, slot: usize);

    /// Sample the hardware and queue any resulting events
    ///
    /// Called once per fast tick before events are drained. Sources that
    /// are fed from elsewhere can leave this empty.
    fn update(&mut self) {}

    /// Take the next pending event
    fn poll(&mut self) -> Option<InputEvent>;

    /// Overwrite an encoder's position so the next turn continues from it
    fn force_position(&mut self, device: DeviceId, value: NormalizedValue);
}
