//! Application contexts
//!
//! A context is the application the runtime drives: it is initialized
//! once, updated every fast tick, refreshed every slow tick and cleaned up
//! when the runtime is taken apart.

use core::convert::Infallible;

use crate::binding::Binding;
use crate::traits::{InputSource, OutputSink, ViewSink};

/// Application lifecycle
pub trait Context {
    /// Initialization failure
    type Error;

    /// Bring the application to its starting state
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Fast-rate work
    fn update(&mut self);

    /// Slow-rate work
    fn refresh(&mut self) {}

    /// Release whatever `initialize` acquired
    fn cleanup(&mut self) {}

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Standalone controller: every input goes straight to MIDI and the view
pub struct StandaloneContext<I, O, V> {
    binding: Binding<I, O, V>,
}

impl<I, O, V> StandaloneContext<I, O, V>
where
    I: InputSource,
    O: OutputSink,
    V: ViewSink,
{
    pub fn new(binding: Binding<I, O, V>) -> Self {
        Self { binding }
    }

    pub fn binding(&self) -> &Binding<I, O, V> {
        &self.binding
    }

    pub fn binding_mut(&mut self) -> &mut Binding<I, O, V> {
        &mut self.binding
    }

    pub fn into_binding(self) -> Binding<I, O, V> {
        self.binding
    }
}

impl<I, O, V> Context for StandaloneContext<I, O, V>
where
    I: InputSource,
    O: OutputSink,
    V: ViewSink,
{
    type Error = Infallible;

    /// Start with every encoder and slider at the view default
    fn initialize(&mut self) -> Result<(), Self::Error> {
        self.binding.reset_encoders();
        Ok(())
    }

    fn update(&mut self) {
        self.binding.dispatch_pending();
    }

    fn refresh(&mut self) {
        self.binding.refresh_view();
    }

    fn name(&self) -> &'static str {
        "Standalone"
    }
}
