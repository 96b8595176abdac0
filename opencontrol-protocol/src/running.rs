//! Running-status encoder
//!
//! On a serial link consecutive messages with the same status byte may
//! omit it. Receivers drop running status after any other status byte, so
//! [`RunningStatus::reset`] must be called whenever the link may have
//! carried something else (or a write failed).

use crate::message::{ControlChange, MidiError, MESSAGE_LEN};

#[derive(Debug, Clone, Default)]
pub struct RunningStatus {
    last_status: Option<u8>,
}

impl RunningStatus {
    pub const fn new() -> Self {
        Self { last_status: None }
    }

    /// Forget the last status byte so the next message carries one
    pub fn reset(&mut self) {
        self.last_status = None;
    }

    /// Encode `cc` into `buffer`, omitting a repeated status byte
    ///
    /// Returns the number of bytes written (2 or 3).
    pub fn encode(&mut self, cc: &ControlChange, buffer: &mut [u8]) -> Result<usize, MidiError> {
        let bytes = cc.to_bytes();
        let skip = usize::from(self.last_status == Some(cc.status()));
        let len = MESSAGE_LEN - skip;

        let out = buffer.get_mut(..len).ok_or(MidiError::BufferTooSmall)?;
        out.copy_from_slice(&bytes[skip..]);
        self.last_status = Some(cc.status());
        Ok(len)
    }
}
