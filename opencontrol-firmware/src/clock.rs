//! Embassy time source

use embassy_time::Instant;
use opencontrol_core::traits::Clock;

/// Microseconds since boot from the embassy time driver, truncated to the
/// wrapping 32-bit counter the core expects
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_micros(&self) -> u32 {
        Instant::now().as_micros() as u32
    }
}
