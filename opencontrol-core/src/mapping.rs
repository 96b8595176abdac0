//! Channel mapping
//!
//! Translates a device's (kind, index) into its control-change number as
//! `base_for_kind + index`. Nothing is stored per device: the mapping is
//! recomputed on every event so it can never drift from the registry.

use core::ops::Range;

use crate::config::{ConfigError, DeviceKind, MidiConfig};
use crate::config::midi::MIDI_DATA_MAX;

/// Pure (kind, index) to control-change number mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMapping {
    enc_base: u8,
    btn_base: u8,
}

impl ChannelMapping {
    /// Create a mapping from the two base offsets
    pub const fn new(enc_base: u8, btn_base: u8) -> Self {
        Self { enc_base, btn_base }
    }

    /// Create a mapping from the MIDI configuration
    pub const fn from_midi(midi: &MidiConfig) -> Self {
        Self::new(midi.enc_cc_base, midi.btn_cc_base)
    }

    /// Base control-change number of a kind
    pub const fn base(&self, kind: DeviceKind) -> u8 {
        match kind {
            DeviceKind::Rotary => self.enc_base,
            DeviceKind::Momentary => self.btn_base,
        }
    }

    /// Control-change number of the device at `index`
    ///
    /// Only meaningful for indices inside a range accepted by
    /// [`ChannelMapping::check`].
    pub const fn channel(&self, kind: DeviceKind, index: usize) -> u8 {
        (self.base(kind) as usize + index) as u8
    }

    /// Control-change numbers used by `count` devices of a kind
    pub const fn range(&self, kind: DeviceKind, count: usize) -> Range<usize> {
        let start = self.base(kind) as usize;
        start..start + count
    }

    /// Check both ranges fit in 0-127 and do not overlap
    pub const fn check(&self, encoders: usize, buttons: usize) -> Result<(), ConfigError> {
        let enc = self.range(DeviceKind::Rotary, encoders);
        let btn = self.range(DeviceKind::Momentary, buttons);

        if enc.end > MIDI_DATA_MAX as usize + 1 {
            return Err(ConfigError::ChannelOverflow {
                kind: DeviceKind::Rotary,
            });
        }
        if btn.end > MIDI_DATA_MAX as usize + 1 {
            return Err(ConfigError::ChannelOverflow {
                kind: DeviceKind::Momentary,
            });
        }

        let both_used = encoders > 0 && buttons > 0;
        if both_used && enc.start < btn.end && btn.start < enc.end {
            return Err(ConfigError::ChannelOverlap);
        }
        Ok(())
    }
}

impl From<&MidiConfig> for ChannelMapping {
    fn from(midi: &MidiConfig) -> Self {
        Self::from_midi(midi)
    }
}
