//! Control-change message

/// Status nibble of a control-change message
pub const STATUS_CONTROL_CHANGE: u8 = 0xB0;

/// Highest MIDI channel (channels are zero-based on the wire)
pub const MAX_CHANNEL: u8 = 15;

/// Data bytes carry 7 bits
pub const DATA_MASK: u8 = 0x7F;

/// Encoded length of a control change with its status byte
pub const MESSAGE_LEN: usize = 3;

/// Errors from encoding or decoding messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MidiError {
    /// Output buffer cannot hold the message
    BufferTooSmall,
    /// Not enough bytes for a full message
    Incomplete,
    /// Status byte is not a control change
    NotControlChange,
    /// Data byte has its high bit set
    InvalidData,
    /// Transport rejected the write
    Transport,
}

/// A control-change message
///
/// Fields are masked on construction so every instance is valid on the
/// wire: 4-bit channel, 7-bit controller and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlChange {
    channel: u8,
    controller: u8,
    value: u8,
}

impl ControlChange {
    pub const fn new(channel: u8, controller: u8, value: u8) -> Self {
        Self {
            channel: channel & MAX_CHANNEL,
            controller: controller & DATA_MASK,
            value: value & DATA_MASK,
        }
    }

    pub const fn channel(&self) -> u8 {
        self.channel
    }

    pub const fn controller(&self) -> u8 {
        self.controller
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Status byte: `0xB0 | channel`
    pub const fn status(&self) -> u8 {
        STATUS_CONTROL_CHANGE | self.channel
    }

    /// Wire bytes with the status byte
    pub const fn to_bytes(&self) -> [u8; MESSAGE_LEN] {
        [self.status(), self.controller, self.value]
    }

    /// Encode into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, MidiError> {
        let out = buffer
            .get_mut(..MESSAGE_LEN)
            .ok_or(MidiError::BufferTooSmall)?;
        out.copy_from_slice(&self.to_bytes());
        Ok(MESSAGE_LEN)
    }

    /// Decode a full message from the start of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self, MidiError> {
        let [status, controller, value] = match bytes {
            [s, c, v, ..] => [*s, *c, *v],
            _ => return Err(MidiError::Incomplete),
        };
        if status & 0xF0 != STATUS_CONTROL_CHANGE {
            return Err(MidiError::NotControlChange);
        }
        if controller > DATA_MASK || value > DATA_MASK {
            return Err(MidiError::InvalidData);
        }
        Ok(Self::new(status & MAX_CHANNEL, controller, value))
    }
}
