//! Single-threaded search stopping conditions.
//!
//! Replaces the multi-threaded, ponder-aware limit machinery a chess
//! engine needs with the much smaller surface a synchronous,
//! single-threaded search actually uses: an iteration cap and an
//! optional wall-clock cap.

use std::time::{Duration, Instant};

/// Tracks when a running search should stop.
#[derive(Debug)]
pub struct SearchBudget {
    start: Instant,
    max_time: Option<Duration>,
    max_iterations: u32,
}

impl SearchBudget {
    /// `max_time_ms == 0` is the "no time limit" sentinel: the budget is
    /// then governed purely by `max_iterations`.
    pub fn new(max_iterations: u32, max_time_ms: u64) -> Self {
        Self {
            start: Instant::now(),
            max_time: (max_time_ms > 0).then(|| Duration::from_millis(max_time_ms)),
            max_iterations,
        }
    }

    /// Whether a search loop that has just completed `iterations`
    /// iterations should stop before starting another.
    pub fn should_stop(&self, iterations: u32) -> bool {
        if iterations >= self.max_iterations {
            return true;
        }
        match self.max_time {
            Some(limit) => self.start.elapsed() >= limit,
            None => false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_iteration_cap() {
        let budget = SearchBudget::new(10, 0);
        assert!(!budget.should_stop(9));
        assert!(budget.should_stop(10));
        assert!(budget.should_stop(11));
    }

    #[test]
    fn zero_time_limit_never_stops_on_time() {
        let budget = SearchBudget::new(u32::MAX, 0);
        std::thread::sleep(Duration::from_millis(5));
        assert!(!budget.should_stop(0));
    }

    #[test]
    fn nonzero_time_limit_eventually_stops() {
        let budget = SearchBudget::new(u32::MAX, 1);
        std::thread::sleep(Duration::from_millis(20));
        assert!(budget.should_stop(0));
    }
}
