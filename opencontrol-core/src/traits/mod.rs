//! Collaborator traits
//!
//! These traits define the narrow interfaces between the core and the
//! hardware-facing collaborators. Every operation is expected to return in
//! bounded, short time; the core never waits on any of them.

pub mod clock;
pub mod input;
pub mod output;
pub mod view;

pub use clock::Clock;
pub use input::{InputEvent, InputSource};
pub use output::OutputSink;
pub use view::ViewSink;
