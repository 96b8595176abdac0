//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in opencontrol-core and opencontrol-view:
//!
//! - Input: quadrature decoding, encoder position, button debouncing and
//!   the GPIO control surface
//! - MIDI: serial control-change output
//! - Display: SH1106 OLED over I2C

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod input;
pub mod midi;

pub use display::Sh1106;
pub use input::{ControlSurface, SurfaceError};
pub use midi::SerialMidi;
