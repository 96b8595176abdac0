//! Elapsed-time source

/// Monotonic microsecond clock
///
/// The counter is 32 bits wide and wraps (about every 71 minutes);
/// consumers must only use wrapping differences.
pub trait Clock {
    /// Current time in microseconds
    fn now_micros(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_micros(&self) -> u32 {
        (**self).now_micros()
    }
}
