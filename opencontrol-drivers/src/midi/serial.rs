//! Serial MIDI output
//!
//! Output sink writing control changes to a byte stream (UART at 31250
//! baud). Write failures are counted and never reach the caller; the
//! message is simply lost.

use embedded_io::Write;
use opencontrol_core::traits::OutputSink;
use opencontrol_protocol::{ControlChange, MidiError, RunningStatus};

/// Serial MIDI baud rate
pub const MIDI_BAUD: u32 = 31_250;

pub struct SerialMidi<W> {
    writer: W,
    channel: u8,
    running: Option<RunningStatus>,
    sent: u32,
    errors: u32,
    last_error: Option<MidiError>,
}

impl<W: Write> SerialMidi<W> {
    /// Output on MIDI `channel` (0-15), full status on every message
    pub fn new(writer: W, channel: u8) -> Self {
        Self {
            writer,
            channel,
            running: None,
            sent: 0,
            errors: 0,
            last_error: None,
        }
    }

    /// Omit repeated status bytes
    pub fn with_running_status(mut self) -> Self {
        self.running = Some(RunningStatus::new());
        self
    }

    /// Messages written successfully
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Messages lost to write errors
    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn last_error(&self) -> Option<MidiError> {
        self.last_error
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn write_message(&mut self, cc: &ControlChange) -> Result<(), MidiError> {
        let mut buffer = [0u8; 3];
        let len = match self.running.as_mut() {
            Some(running) => running.encode(cc, &mut buffer)?,
            None => cc.encode(&mut buffer)?,
        };
        self.writer
            .write_all(&buffer[..len])
            .map_err(|_| MidiError::Transport)
    }
}

impl<W: Write> OutputSink for SerialMidi<W> {
    fn send(&mut self, channel: u8, value: u8) {
        let cc = ControlChange::new(self.channel, channel, value);
        match self.write_message(&cc) {
            Ok(()) => self.sent = self.sent.wrapping_add(1),
            Err(e) => {
                self.errors = self.errors.wrapping_add(1);
                self.last_error = Some(e);
                // Receiver may have missed the status byte
                if let Some(running) = self.running.as_mut() {
                    running.reset();
                }
            }
        }
    }
}
