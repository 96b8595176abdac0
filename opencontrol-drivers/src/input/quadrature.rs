//! Quadrature decoder
//!
//! Full-cycle state machine for detented encoders with pull-ups (both
//! channels idle high). One step is reported per completed detent; partial
//! movements that return to idle are treated as bounce.
//!
//! ```text
//! CW:   (1,1) -> (0,1) -> (0,0) -> (1,x | x,1)   A falls first
//! CCW:  (1,1) -> (1,0) -> (0,0) -> (1,x | x,1)   B falls first
//! ```

/// Direction of one decoded step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Clockwise,
    CounterClockwise,
}

impl Step {
    /// Signed tick delta, reversed when `invert` is set
    pub fn delta(self, invert: bool) -> i32 {
        match (self, invert) {
            (Step::Clockwise, false) | (Step::CounterClockwise, true) => 1,
            (Step::Clockwise, true) | (Step::CounterClockwise, false) => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// A fell first
    Cw1,
    /// Both low after A
    Cw2,
    /// B fell first
    Ccw1,
    /// Both low after B
    Ccw2,
}

/// Quadrature state machine for one encoder
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    phase: Phase,
    last: (bool, bool),
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            last: (true, true),
        }
    }

    /// Feed the current channel levels
    ///
    /// Should be sampled at least every couple of milliseconds; the fast
    /// tick is plenty.
    pub fn update(&mut self, a: bool, b: bool) -> Option<Step> {
        if (a, b) == self.last {
            return None;
        }
        self.last = (a, b);

        let (next, step) = match self.phase {
            Phase::Idle => match (a, b) {
                (false, true) => (Phase::Cw1, None),
                (true, false) => (Phase::Ccw1, None),
                _ => (Phase::Idle, None),
            },
            Phase::Cw1 => match (a, b) {
                (false, false) => (Phase::Cw2, None),
                (true, true) => (Phase::Idle, None),
                _ => (Phase::Cw1, None),
            },
            Phase::Ccw1 => match (a, b) {
                (false, false) => (Phase::Ccw2, None),
                (true, true) => (Phase::Idle, None),
                _ => (Phase::Ccw1, None),
            },
            Phase::Cw2 if a || b => (Phase::Idle, Some(Step::Clockwise)),
            Phase::Ccw2 if a || b => (Phase::Idle, Some(Step::CounterClockwise)),
            phase => (phase, None),
        };

        self.phase = next;
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(decoder: &mut QuadratureDecoder, levels: &[(bool, bool)]) -> Option<Step> {
        let mut result = None;
        for &(a, b) in levels {
            if let Some(step) = decoder.update(a, b) {
                assert!(result.is_none(), "more than one step decoded");
                result = Some(step);
            }
        }
        result
    }

    #[test]
    fn test_clockwise_detent() {
        let mut decoder = QuadratureDecoder::new();
        let step = feed(&mut decoder, &[(false, true), (false, false), (true, false), (true, true)]);
        assert_eq!(step, Some(Step::Clockwise));
    }

    #[test]
    fn test_counter_clockwise_detent() {
        let mut decoder = QuadratureDecoder::new();
        let step = feed(&mut decoder, &[(true, false), (false, false), (false, true), (true, true)]);
        assert_eq!(step, Some(Step::CounterClockwise));
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut decoder = QuadratureDecoder::new();
        let step = feed(
            &mut decoder,
            &[(false, true), (true, true), (false, true), (true, true)],
        );
        assert_eq!(step, None);
    }

    #[test]
    fn test_repeated_levels_do_nothing() {
        let mut decoder = QuadratureDecoder::new();
        assert_eq!(decoder.update(true, true), None);
        assert_eq!(decoder.update(true, true), None);
    }

    #[test]
    fn test_consecutive_detents() {
        let mut decoder = QuadratureDecoder::new();
        let cycle = [(false, true), (false, false), (true, false), (true, true)];
        assert_eq!(feed(&mut decoder, &cycle), Some(Step::Clockwise));
        assert_eq!(feed(&mut decoder, &cycle), Some(Step::Clockwise));
    }

    #[test]
    fn test_step_delta() {
        assert_eq!(Step::Clockwise.delta(false), 1);
        assert_eq!(Step::Clockwise.delta(true), -1);
        assert_eq!(Step::CounterClockwise.delta(false), -1);
        assert_eq!(Step::CounterClockwise.delta(true), 1);
    }
}
