//! Dual-rate cooperative scheduler
//!
//! Drives two periodic activities from one loop:
//!
//! - **fast**: input polling and event dispatch, at `APP_HZ`
//! - **slow**: view refresh, at `LVGL_HZ`
//!
//! Each call to [`Scheduler::step`] reads the time once. Nothing is due
//! until a full fast period has passed since the last fast run. A fast run
//! snaps the fast timestamp to the sampled time, so an overrun shifts the
//! phase instead of producing catch-up bursts. The elapsed time is added to
//! the slow carry; once the carry reaches the slow period the slow activity
//! runs once and the carry restarts from zero. Two slow runs are therefore
//! never closer than one slow period.
//!
//! All time arithmetic wraps, so the 32-bit microsecond counter may roll
//! over freely.

use crate::config::Timing;

/// Work driven by the scheduler
pub trait Periodic {
    /// Runs once per fast period
    fn fast(&mut self);

    /// Runs once per slow period, always after that tick's fast run
    fn slow(&mut self);
}

/// What a scheduler step ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Fast period not yet elapsed
    Idle,
    /// Fast activity ran
    Fast,
    /// Fast activity ran, then the slow activity
    FastAndSlow,
}

/// Dual-rate scheduler state
#[derive(Debug, Clone)]
pub struct Scheduler {
    fast_period_us: u32,
    slow_period_us: u32,
    last_fast_us: u32,
    slow_carry_us: u32,
}

impl Scheduler {
    /// Create a scheduler whose first fast run is due one period after `now`
    ///
    /// `timing` is expected to be validated.
    pub fn new(timing: &Timing, now: u32) -> Self {
        Self {
            fast_period_us: timing.app_period_us().max(1),
            slow_period_us: timing.view_period_us().max(1),
            last_fast_us: now,
            slow_carry_us: 0,
        }
    }

    /// Advance the scheduler to `now`, running whatever is due
    pub fn step<P: Periodic + ?Sized>(&mut self, now: u32, work: &mut P) -> Tick {
        let elapsed = now.wrapping_sub(self.last_fast_us);
        if elapsed < self.fast_period_us {
            return Tick::Idle;
        }

        self.last_fast_us = now;
        work.fast();

        self.slow_carry_us = self.slow_carry_us.saturating_add(elapsed);
        if self.slow_carry_us < self.slow_period_us {
            return Tick::Fast;
        }

        self.slow_carry_us = 0;
        work.slow();
        Tick::FastAndSlow
    }

    /// Fast period in microseconds
    pub fn fast_period_us(&self) -> u32 {
        self.fast_period_us
    }

    /// Slow period in microseconds
    pub fn slow_period_us(&self) -> u32 {
        self.slow_period_us
    }

    /// Time accumulated towards the next slow run
    pub fn slow_carry_us(&self) -> u32 {
        self.slow_carry_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Counter {
        fast: u32,
        slow: u32,
        slow_before_fast: bool,
        fast_since_slow: bool,
    }

    impl Periodic for Counter {
        fn fast(&mut self) {
            self.fast += 1;
            self.fast_since_slow = true;
        }

        fn slow(&mut self) {
            if !self.fast_since_slow {
                self.slow_before_fast = true;
            }
            self.fast_since_slow = false;
            self.slow += 1;
        }
    }

    fn scheduler(app_hz: u32, view_hz: u32, now: u32) -> Scheduler {
        Scheduler::new(&Timing::new(app_hz, view_hz, 5), now)
    }

    #[test]
    fn test_idle_before_first_period() {
        let mut sched = scheduler(2000, 100, 0);
        let mut work = Counter::default();

        assert_eq!(sched.step(0, &mut work), Tick::Idle);
        assert_eq!(sched.step(499, &mut work), Tick::Idle);
        assert_eq!(work.fast, 0);

        assert_eq!(sched.step(500, &mut work), Tick::Fast);
        assert_eq!(work.fast, 1);
    }

    #[test]
    fn test_periods_from_timing() {
        let sched = scheduler(2000, 100, 0);
        assert_eq!(sched.fast_period_us(), 500);
        assert_eq!(sched.slow_period_us(), 10_000);
    }

    #[test]
    fn test_overrun_snaps_without_catch_up() {
        let mut sched = scheduler(1000, 100, 0);
        let mut work = Counter::default();

        // Five periods late: one fast run only
        assert_eq!(sched.step(5_500, &mut work), Tick::Fast);
        // Next run is due a full period after the late one
        assert_eq!(sched.step(5_600, &mut work), Tick::Idle);
        assert_eq!(sched.step(6_499, &mut work), Tick::Idle);
        assert_eq!(sched.step(6_500, &mut work), Tick::Fast);
        assert_eq!(work.fast, 2);
        assert_eq!(sched.slow_carry_us(), 6_500);
    }

    #[test]
    fn test_slow_backlog_is_dropped() {
        let mut sched = scheduler(1000, 100, 0);
        let mut work = Counter::default();

        // Four slow periods elapse at once: one slow run, carry cleared
        assert_eq!(sched.step(40_000, &mut work), Tick::FastAndSlow);
        assert_eq!(work.slow, 1);
        assert_eq!(sched.slow_carry_us(), 0);

        assert_eq!(sched.step(41_000, &mut work), Tick::Fast);
        assert_eq!(sched.slow_carry_us(), 1_000);
    }

    #[test]
    fn test_slow_run_clears_carry() {
        let mut sched = scheduler(1000, 100, 0);
        let mut work = Counter::default();

        assert_eq!(sched.step(9_000, &mut work), Tick::Fast);
        assert_eq!(sched.step(12_500, &mut work), Tick::FastAndSlow);
        assert_eq!(sched.slow_carry_us(), 0);
    }

    #[test]
    fn test_late_slow_run_not_followed_by_another() {
        let mut sched = scheduler(2000, 100, 0);
        let mut work = Counter::default();

        // Nearly two slow periods late
        assert_eq!(sched.step(19_500, &mut work), Tick::FastAndSlow);
        assert_eq!(sched.step(20_000, &mut work), Tick::Fast);

        let mut now = 20_000;
        while now < 29_000 {
            now += 500;
            assert_eq!(sched.step(now, &mut work), Tick::Fast);
        }
        // One full slow period after the late run
        assert_eq!(sched.step(29_500, &mut work), Tick::FastAndSlow);
        assert_eq!(work.slow, 2);
    }

    #[test]
    fn test_equal_rates_run_slow_every_tick() {
        let mut sched = scheduler(100, 100, 0);
        let mut work = Counter::default();

        for n in 1..=10u32 {
            assert_eq!(sched.step(n * 10_000, &mut work), Tick::FastAndSlow);
        }
        assert_eq!(work.fast, 10);
        assert_eq!(work.slow, 10);
        assert!(!work.slow_before_fast);
    }

    #[test]
    fn test_counter_wraparound() {
        let start = u32::MAX - 700;
        let mut sched = scheduler(2000, 100, start);
        let mut work = Counter::default();

        assert_eq!(sched.step(start.wrapping_add(400), &mut work), Tick::Idle);
        // Crosses zero: elapsed is still 500
        assert_eq!(sched.step(start.wrapping_add(500), &mut work), Tick::Fast);
        assert_eq!(sched.step(start.wrapping_add(999), &mut work), Tick::Idle);
        assert_eq!(sched.step(start.wrapping_add(1_000), &mut work), Tick::Fast);
        assert_eq!(work.fast, 2);
    }

    proptest! {
        #[test]
        fn prop_rates_track_configuration(
            app_hz in 1u32..=20_000,
            view_ratio in 0.0f64..=1.0,
            divisor in 1u32..=4,
            steps in 1u32..4_000,
            start in any::<u32>(),
        ) {
            let view_hz = ((app_hz as f64 * view_ratio) as u32).clamp(1, app_hz);
            let mut sched = scheduler(app_hz, view_hz, start);
            let mut work = Counter::default();

            let fast_period = sched.fast_period_us();
            let slow_period = sched.slow_period_us();
            let dt = if fast_period % divisor == 0 {
                fast_period / divisor
            } else {
                fast_period
            };

            let mut now = start;
            for _ in 0..steps {
                now = now.wrapping_add(dt);
                sched.step(now, &mut work);
            }

            let total = steps as u64 * dt as u64;
            let fast_expected = total / fast_period as u64;
            // Slow runs on every n-th fast run
            let fast_per_slow = slow_period.div_ceil(fast_period) as u64;
            let slow_expected = work.fast as u64 / fast_per_slow;

            prop_assert!((work.fast as u64).abs_diff(fast_expected) <= 1);
            prop_assert_eq!(work.slow as u64, slow_expected);
            prop_assert!(!work.slow_before_fast);
        }

        #[test]
        fn prop_slow_runs_at_least_one_period_apart(
            gaps in proptest::collection::vec(1u32..30_000, 1..400),
            start in any::<u32>(),
        ) {
            let mut sched = scheduler(2000, 100, start);
            let mut work = Counter::default();
            let mut last_slow: Option<u32> = None;

            let mut now = start;
            for gap in gaps {
                now = now.wrapping_add(gap);
                if sched.step(now, &mut work) == Tick::FastAndSlow {
                    if let Some(last) = last_slow {
                        prop_assert!(now.wrapping_sub(last) >= sched.slow_period_us());
                    }
                    last_slow = Some(now);
                }
            }
        }
    }
}
