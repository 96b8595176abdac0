//! Input device descriptors and the control registry
//!
//! A descriptor's position in its sequence is its key: it is both the
//! offset of its control-change number and the index of its view slot.
//! There is no other mapping table.

use super::error::ConfigError;
use super::midi::MidiConfig;
use crate::mapping::ChannelMapping;

/// Device identity, unique within its kind
pub type DeviceId = u16;

/// Encoder pulses per revolution (project default)
pub const DEFAULT_PPR: u16 = 24;

/// Usable angular range in degrees (project default)
pub const DEFAULT_RANGE_DEG: u16 = 270;

/// Decoder ticks per emitted step (project default)
pub const DEFAULT_TICKS_PER_EVENT: u8 = 1;

/// Kind of input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceKind {
    /// Rotary encoder reporting a normalized position
    Rotary,
    /// Momentary button reporting press/release
    Momentary,
}

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an active-low pin with pull-up (typical switch to ground)
    pub const fn active_low(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// Rotary encoder descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderDef {
    /// Stable identity
    pub id: DeviceId,
    /// Quadrature channel A
    pub pin_a: PinConfig,
    /// Quadrature channel B
    pub pin_b: PinConfig,
    /// Pulses per full revolution
    pub ppr: u16,
    /// Angular range mapped onto 0.0..=1.0, in degrees
    pub range_deg: u16,
    /// Decoder ticks needed for one position step
    pub ticks_per_event: u8,
    /// Reverse the direction of rotation
    pub invert: bool,
}

impl EncoderDef {
    /// Create an encoder with the project default tuning
    pub const fn new(id: DeviceId, pin_a: u8, pin_b: u8) -> Self {
        Self {
            id,
            pin_a: PinConfig::with_pullup(pin_a),
            pin_b: PinConfig::with_pullup(pin_b),
            ppr: DEFAULT_PPR,
            range_deg: DEFAULT_RANGE_DEG,
            ticks_per_event: DEFAULT_TICKS_PER_EVENT,
            invert: false,
        }
    }

    /// Override the tuning parameters
    pub const fn with_tuning(
        mut self,
        ppr: u16,
        range_deg: u16,
        ticks_per_event: u8,
        invert: bool,
    ) -> Self {
        self.ppr = ppr;
        self.range_deg = range_deg;
        self.ticks_per_event = ticks_per_event;
        self.invert = invert;
        self
    }

    /// Number of position steps spanning the angular range
    ///
    /// One revolution is `ppr` steps over 360 degrees. Never less than 1.
    pub const fn steps_in_range(&self) -> u32 {
        let steps = (self.ppr as u32 * self.range_deg as u32) / 360;
        if steps == 0 {
            1
        } else {
            steps
        }
    }
}

/// Momentary button descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDef {
    /// Stable identity
    pub id: DeviceId,
    /// Input pin; `inverted` means the button reads low when pressed
    pub pin: PinConfig,
}

impl ButtonDef {
    /// Create a button wired to ground (active-low, pull-up)
    pub const fn active_low(id: DeviceId, pin: u8) -> Self {
        Self {
            id,
            pin: PinConfig::active_low(pin),
        }
    }

    /// Create a button wired to the supply (active-high)
    pub const fn active_high(id: DeviceId, pin: u8) -> Self {
        Self {
            id,
            pin: PinConfig::new(pin),
        }
    }

    /// Whether the button reads low when pressed
    pub const fn is_active_low(&self) -> bool {
        self.pin.inverted
    }
}

/// Ordered, fixed registry of input devices
///
/// Read-only after startup. The index of a descriptor in `encoders` or
/// `buttons` is its channel offset and view slot.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Registry {
    /// Rotary devices, in slot order
    pub encoders: &'static [EncoderDef],
    /// Momentary devices, in slot order
    pub buttons: &'static [ButtonDef],
}

impl Registry {
    /// Create a registry from two static sequences
    pub const fn new(
        encoders: &'static [EncoderDef],
        buttons: &'static [ButtonDef],
    ) -> Self {
        Self { encoders, buttons }
    }

    /// Number of devices of a kind
    pub const fn len(&self, kind: DeviceKind) -> usize {
        match kind {
            DeviceKind::Rotary => self.encoders.len(),
            DeviceKind::Momentary => self.buttons.len(),
        }
    }

    /// Check the registry holds no devices
    pub const fn is_empty(&self) -> bool {
        self.encoders.is_empty() && self.buttons.is_empty()
    }

    /// Validate the registry against the MIDI configuration
    ///
    /// Checks identity uniqueness within each sequence, encoder tuning,
    /// and that both control-change ranges fit in 0-127 without
    /// overlapping. Usable in `const` assertions.
    pub const fn validate(&self, midi: &MidiConfig) -> Result<(), ConfigError> {
        if let Err(e) = midi.validate() {
            return Err(e);
        }

        let mut i = 0;
        while i < self.encoders.len() {
            let enc = &self.encoders[i];
            if enc.ppr == 0 || enc.range_deg == 0 || enc.ticks_per_event == 0 {
                return Err(ConfigError::InvalidTuning { id: enc.id });
            }
            let mut j = i + 1;
            while j < self.encoders.len() {
                if self.encoders[j].id == enc.id {
                    return Err(ConfigError::DuplicateId {
                        kind: DeviceKind::Rotary,
                        id: enc.id,
                    });
                }
                j += 1;
            }
            i += 1;
        }

        let mut i = 0;
        while i < self.buttons.len() {
            let mut j = i + 1;
            while j < self.buttons.len() {
                if self.buttons[j].id == self.buttons[i].id {
                    return Err(ConfigError::DuplicateId {
                        kind: DeviceKind::Momentary,
                        id: self.buttons[i].id,
                    });
                }
                j += 1;
            }
            i += 1;
        }

        ChannelMapping::from_midi(midi).check(self.encoders.len(), self.buttons.len())
    }
}
