//! Button debouncing
//!
//! A level change is accepted once the raw input has held the new level
//! for the debounce time. Samples are stamped with the wrapping microsecond
//! clock.

/// Debounced edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    debounce_us: u32,
    stable: bool,
    candidate: bool,
    since_us: u32,
}

impl Debouncer {
    /// Debouncer starting in the released state
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_us: debounce_ms.saturating_mul(1000),
            stable: false,
            candidate: false,
            since_us: 0,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Feed the raw active level sampled at `now_us`
    pub fn update(&mut self, active: bool, now_us: u32) -> Option<Edge> {
        if active != self.candidate {
            self.candidate = active;
            self.since_us = now_us;
        }

        if self.candidate == self.stable
            || now_us.wrapping_sub(self.since_us) < self.debounce_us
        {
            return None;
        }

        self.stable = self.candidate;
        Some(if self.stable {
            Edge::Pressed
        } else {
            Edge::Released
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u32 = 1000;

    #[test]
    fn test_press_after_debounce_time() {
        let mut btn = Debouncer::new(5);
        assert_eq!(btn.update(true, 100 * MS), None);
        assert_eq!(btn.update(true, 104 * MS), None);
        assert_eq!(btn.update(true, 105 * MS), Some(Edge::Pressed));
        assert_eq!(btn.update(true, 106 * MS), None);
        assert!(btn.is_pressed());
    }

    #[test]
    fn test_bounce_restarts_timer() {
        let mut btn = Debouncer::new(5);
        btn.update(true, 0);
        btn.update(false, 3 * MS);
        btn.update(true, 4 * MS);
        assert_eq!(btn.update(true, 8 * MS), None);
        assert_eq!(btn.update(true, 9 * MS), Some(Edge::Pressed));
    }

    #[test]
    fn test_release() {
        let mut btn = Debouncer::new(5);
        btn.update(true, 0);
        assert_eq!(btn.update(true, 5 * MS), Some(Edge::Pressed));
        btn.update(false, 10 * MS);
        assert_eq!(btn.update(false, 15 * MS), Some(Edge::Released));
        assert!(!btn.is_pressed());
    }

    #[test]
    fn test_short_glitch_is_ignored() {
        let mut btn = Debouncer::new(5);
        btn.update(true, 0);
        assert_eq!(btn.update(false, 2 * MS), None);
        assert_eq!(btn.update(false, 20 * MS), None);
        assert!(!btn.is_pressed());
    }

    #[test]
    fn test_zero_debounce_is_immediate() {
        let mut btn = Debouncer::new(0);
        assert_eq!(btn.update(true, 7 * MS), Some(Edge::Pressed));
    }

    #[test]
    fn test_counter_wraparound() {
        let mut btn = Debouncer::new(5);
        btn.update(true, u32::MAX - 2 * MS);
        assert_eq!(btn.update(true, 3 * MS), Some(Edge::Pressed));
    }
}
