//! Configuration errors

use super::devices::{DeviceId, DeviceKind};

/// Errors detected while validating static configuration
///
/// These are reported once at startup (or at compile time through
/// `const` assertions), never on the per-event path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A rate of zero Hz was configured
    ZeroRate,
    /// A rate above 1 MHz leaves no whole microsecond period
    RateTooHigh,
    /// The view refresh rate exceeds the input poll rate
    ViewFasterThanApp,
    /// The same identity appears twice in one device sequence
    DuplicateId { kind: DeviceKind, id: DeviceId },
    /// A device sequence maps past control-change number 127
    ChannelOverflow { kind: DeviceKind },
    /// Encoder and button channel ranges share a control-change number
    ChannelOverlap,
    /// MIDI channel outside 0-15
    MidiChannelOutOfRange,
    /// More devices than the view has slots for
    CapacityExceeded {
        kind: DeviceKind,
        devices: usize,
        slots: usize,
    },
    /// Encoder tuning that cannot produce a position (zero PPR, range or ticks)
    InvalidTuning { id: DeviceId },
}
