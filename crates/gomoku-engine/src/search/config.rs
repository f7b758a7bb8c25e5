//! Tunable parameters for [`super::search`].

/// Parameters governing one call to [`super::search`].
///
/// `max_time_ms == 0` means "no time limit" — the search runs until
/// `max_iterations` is exhausted regardless of wall time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Exploration constant `c` in the UCT formula.
    pub c: f64,
    /// Hard cap on the number of select/expand/simulate/backpropagate
    /// iterations.
    pub max_iterations: u32,
    /// Wall-time budget in milliseconds. Zero means unbounded.
    pub max_time_ms: u64,
    /// Seed for the search's random number generator, for reproducible
    /// rollouts and expansion sampling.
    pub seed: u64,
    /// Run the heuristic-guided rollout policy during simulation.
    pub use_heuristic_rollout: bool,
    /// Run the uniform-random rollout policy during simulation.
    pub use_random_rollout: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            c: 1.2,
            max_iterations: 10_000,
            max_time_ms: 1_000,
            seed: 0,
            use_heuristic_rollout: true,
            use_random_rollout: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.c, 1.2);
        assert_eq!(cfg.max_iterations, 10_000);
        assert_eq!(cfg.max_time_ms, 1_000);
        assert_eq!(cfg.seed, 0);
        assert!(cfg.use_heuristic_rollout);
        assert!(cfg.use_random_rollout);
    }
}
