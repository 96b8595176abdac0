//! MIDI output

pub mod serial;

pub use serial::{SerialMidi, MIDI_BAUD};
