//! Control-change stream parser
//!
//! Byte-at-a-time state machine for reading a serial MIDI stream back:
//!
//! - running status is honoured after a control-change status byte
//! - real-time bytes (`0xF8..=0xFF`) may appear anywhere and are skipped
//! - any other status byte cancels running status; its data bytes are
//!   skipped until the next control-change status

use crate::message::{ControlChange, MAX_CHANNEL, STATUS_CONTROL_CHANGE};

const STATUS_BIT: u8 = 0x80;
const REALTIME_START: u8 = 0xF8;

#[derive(Debug, Clone, Default)]
pub struct MessageParser {
    status: Option<u8>,
    controller: Option<u8>,
}

impl MessageParser {
    pub const fn new() -> Self {
        Self {
            status: None,
            controller: None,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.status = None;
        self.controller = None;
    }

    /// Feed a single byte
    ///
    /// Returns a message when `byte` completes one.
    pub fn feed(&mut self, byte: u8) -> Option<ControlChange> {
        if byte >= REALTIME_START {
            return None;
        }

        if byte & STATUS_BIT != 0 {
            self.controller = None;
            self.status = (byte & 0xF0 == STATUS_CONTROL_CHANGE).then_some(byte);
            return None;
        }

        let status = self.status?;
        match self.controller.take() {
            None => {
                self.controller = Some(byte);
                None
            }
            Some(controller) => Some(ControlChange::new(status & MAX_CHANNEL, controller, byte)),
        }
    }

    /// Feed bytes until one message completes
    ///
    /// Returns the message and the number of bytes consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<(ControlChange, usize)> {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(cc) = self.feed(byte) {
                return Some((cc, i + 1));
            }
        }
        None
    }
}
