//! Board-agnostic runtime core for the Open Control surface firmware
//!
//! This crate contains the logic that turns input events into MIDI
//! control-change messages and view updates, independent of any hardware:
//!
//! - Control registry and channel mapping (configuration types)
//! - Collaborator traits (input source, output sink, view sink, clock)
//! - Binding layer with the encoder reset policy
//! - Dual-rate cooperative scheduler
//! - Application context and the top-level runtime
//!
//! # Architecture
//!
//! ```text
//! Registry --> Binding --> OutputSink (MIDI CC)
//!                  \-----> ViewSink   (sliders, indicators)
//!
//! Clock --> Scheduler --> fast: Context::update  (poll + dispatch)
//!                    \--> slow: Context::refresh (view refresh)
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod binding;
pub mod config;
pub mod context;
pub mod mapping;
pub mod runtime;
pub mod scheduler;
pub mod traits;
pub mod value;

#[cfg(test)]
mod testing;

pub use binding::{Binding, RESET_CONTROL};
pub use config::{ButtonDef, ConfigError, DeviceId, DeviceKind, EncoderDef, MidiConfig, Registry, Timing};
pub use context::{Context, StandaloneContext};
pub use mapping::ChannelMapping;
pub use runtime::{Runtime, StartupError};
pub use scheduler::{Periodic, Scheduler, Tick};
pub use value::NormalizedValue;
