//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during a search call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total iterations performed across all trees.
    pub iterations: u32,

    /// Trees searched.
    pub trees: u32,

    /// Nodes expanded (added to a tree).
    pub nodes_expanded: u32,

    /// Simulations (rollouts) performed.
    pub simulations: u32,

    /// Moves played inside rollouts.
    pub rollout_moves: u64,

    /// Maximum depth reached during search.
    pub max_depth: u16,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold the counters of one tree into these totals. Time is measured by
    /// the caller around the whole call.
    pub fn absorb(&mut self, other: &SearchStats) {
        self.iterations += other.iterations;
        self.trees += other.trees;
        self.nodes_expanded += other.nodes_expanded;
        self.simulations += other.simulations;
        self.rollout_moves += other.rollout_moves;
        self.max_depth = self.max_depth.max(other.max_depth);
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.simulations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average rollout length.
    #[must_use]
    pub fn avg_rollout_moves(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.rollout_moves as f64 / self.simulations as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.simulations, 0);
        assert_eq!(stats.avg_rollout_moves(), 0.0);
    }

    #[test]
    fn test_stats_iterations_per_second() {
        let mut stats = SearchStats::new();
        stats.iterations = 1000;
        stats.time_us = 1_000_000;

        assert_eq!(stats.iterations_per_second(), 1000.0);
    }

    #[test]
    fn test_stats_absorb() {
        let mut total = SearchStats::new();
        let tree = SearchStats {
            iterations: 10,
            trees: 1,
            nodes_expanded: 8,
            simulations: 10,
            rollout_moves: 40,
            max_depth: 3,
            time_us: 0,
        };
        total.absorb(&tree);
        total.absorb(&SearchStats { max_depth: 5, ..tree.clone() });

        assert_eq!(total.iterations, 20);
        assert_eq!(total.trees, 2);
        assert_eq!(total.max_depth, 5);
        assert_eq!(total.avg_rollout_moves(), 4.0);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.iterations = 100;
        stats.simulations = 50;

        stats.reset();

        assert_eq!(stats, SearchStats::default());
    }
}
