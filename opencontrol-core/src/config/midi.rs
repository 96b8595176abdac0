//! MIDI output configuration

use super::error::ConfigError;

/// Highest valid control-change number and 7-bit data value
pub const MIDI_DATA_MAX: u8 = 127;

/// Highest valid MIDI channel (channel 16 in musician-speak)
pub const MIDI_CHANNEL_MAX: u8 = 15;

/// MIDI output configuration
///
/// The two bases define where each device sequence starts in the
/// control-change number space. They must be chosen so the encoder and
/// button ranges never overlap; see [`crate::Registry::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidiConfig {
    /// MIDI channel (0-15) used for every message
    pub channel: u8,
    /// Control-change number of encoder 0
    pub enc_cc_base: u8,
    /// Control-change number of button 0
    pub btn_cc_base: u8,
}

impl MidiConfig {
    /// Create a new MIDI configuration
    pub const fn new(channel: u8, enc_cc_base: u8, btn_cc_base: u8) -> Self {
        Self {
            channel,
            enc_cc_base,
            btn_cc_base,
        }
    }

    /// Check the MIDI channel is in range
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.channel > MIDI_CHANNEL_MAX {
            return Err(ConfigError::MidiChannelOutOfRange);
        }
        Ok(())
    }
}

impl Default for MidiConfig {
    fn default() -> Self {
        Self::new(0, 16, 20)
    }
}
