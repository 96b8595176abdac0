//! MIDI control-change wire encoding
//!
//! The controller only ever transmits control-change messages, over a
//! serial link (DIN / TRS, 31250 baud):
//!
//! ```text
//! ┌──────────────┬────────────┬───────┐
//! │ 0xB0 | CHAN  │ CONTROLLER │ VALUE │
//! └──────────────┴────────────┴───────┘
//! ```
//!
//! This crate provides the message encoding, an optional running-status
//! encoder for the serial link and a byte parser for reading a
//! control-change stream back.

#![no_std]
#![deny(unsafe_code)]

pub mod message;
pub mod parser;
pub mod running;

pub use message::{ControlChange, MidiError, DATA_MASK, MAX_CHANNEL, STATUS_CONTROL_CHANGE};
pub use parser::MessageParser;
pub use running::RunningStatus;
