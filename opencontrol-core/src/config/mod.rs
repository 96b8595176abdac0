//! Configuration types
//!
//! Static, board-agnostic configuration: input device descriptors, the
//! control registry, timing rates and MIDI channel bases. All of it is
//! defined once at build time and validated once at startup.

pub mod devices;
pub mod error;
pub mod midi;
pub mod timing;

pub use devices::*;
pub use error::ConfigError;
pub use midi::MidiConfig;
pub use timing::Timing;
