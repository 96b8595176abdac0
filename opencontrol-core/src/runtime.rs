//! Top-level runtime
//!
//! One [`Runtime`] owns the clock, the scheduler and the application
//! context. It is built once at boot and stepped from the main loop.

use crate::config::{ConfigError, Timing};
use crate::context::Context;
use crate::scheduler::{Periodic, Scheduler, Tick};
use crate::traits::Clock;

/// Why the runtime could not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError<E> {
    /// Timing configuration rejected
    Config(ConfigError),
    /// Context initialization failed
    Context(E),
}

impl<E> From<ConfigError> for StartupError<E> {
    fn from(e: ConfigError) -> Self {
        StartupError::Config(e)
    }
}

/// Clock, scheduler and context
pub struct Runtime<K, X> {
    clock: K,
    scheduler: Scheduler,
    context: X,
}

impl<K, X> Runtime<K, X>
where
    K: Clock,
    X: Context,
{
    /// Validate the timing, initialize the context and arm the scheduler
    pub fn new(clock: K, timing: &Timing, mut context: X) -> Result<Self, StartupError<X::Error>> {
        timing.validate()?;
        context.initialize().map_err(StartupError::Context)?;

        let scheduler = Scheduler::new(timing, clock.now_micros());
        Ok(Self {
            clock,
            scheduler,
            context,
        })
    }

    /// Sample the clock once and run whatever is due
    pub fn step(&mut self) -> Tick {
        let now = self.clock.now_micros();
        self.scheduler.step(now, &mut Work(&mut self.context))
    }

    /// Name of the running context
    pub fn name(&self) -> &'static str {
        self.context.name()
    }

    pub fn context(&self) -> &X {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut X {
        &mut self.context
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Clean up the context and hand it back
    pub fn shutdown(mut self) -> X {
        self.context.cleanup();
        self.context
    }
}

struct Work<'a, X>(&'a mut X);

impl<X: Context> Periodic for Work<'_, X> {
    fn fast(&mut self) {
        self.0.update();
    }

    fn slow(&mut self) {
        self.0.refresh();
    }
}
