//! Scheduler timing configuration

use super::error::ConfigError;

/// Microseconds per second
pub const MICROS_PER_SECOND: u32 = 1_000_000;

/// Rates of the two periodic activities
///
/// `app_hz` drives input polling and binding dispatch, `view_hz` drives the
/// view refresh. `app_hz` should be at least `view_hz`: a slower app rate
/// makes the view refresh the bottleneck clock, which [`Timing::validate`]
/// reports as [`ConfigError::ViewFasterThanApp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Input poll rate (Hz)
    pub app_hz: u32,
    /// View refresh rate (Hz)
    pub view_hz: u32,
    /// Button debounce window (ms)
    pub debounce_ms: u8,
}

impl Timing {
    /// Create a new timing configuration
    pub const fn new(app_hz: u32, view_hz: u32, debounce_ms: u8) -> Self {
        Self {
            app_hz,
            view_hz,
            debounce_ms,
        }
    }

    /// Fast activity period in microseconds
    pub const fn app_period_us(&self) -> u32 {
        period_us(self.app_hz)
    }

    /// Slow activity period in microseconds
    pub const fn view_period_us(&self) -> u32 {
        period_us(self.view_hz)
    }

    /// Check rates are usable and ordered
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.app_hz == 0 || self.view_hz == 0 {
            return Err(ConfigError::ZeroRate);
        }
        if self.app_hz > MICROS_PER_SECOND || self.view_hz > MICROS_PER_SECOND {
            return Err(ConfigError::RateTooHigh);
        }
        if self.app_hz < self.view_hz {
            return Err(ConfigError::ViewFasterThanApp);
        }
        Ok(())
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(2000, 100, 5)
    }
}

/// Period of a rate, saturating a zero rate to the longest period
const fn period_us(hz: u32) -> u32 {
    if hz == 0 {
        u32::MAX
    } else {
        MICROS_PER_SECOND / hz
    }
}
