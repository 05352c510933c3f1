//! Search configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// When hidden information is resampled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Determinization {
    /// Search the state exactly as given, opponents' hands and pile order
    /// included. A perfect-information baseline for comparing the other
    /// policies against; it is not a fair player.
    Never,
    /// One deal shared by every tree of a search call.
    PerCall,
    /// One deal per tree.
    PerTree,
    /// A fresh deal for every iteration.
    #[default]
    PerIteration,
}

/// How far a rollout is played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RolloutHorizon {
    /// Play to the end of the game.
    #[default]
    GameEnd,
    /// Stop once the current scoring phase completes and credit the
    /// current leader.
    ChallengeEnd,
}

/// ISMCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// UCB1 exploration constant (default: 0.7).
    pub exploration: f64,

    /// Iterations per tree.
    pub iterations: u32,

    /// Independent trees. More than one runs them on scoped threads and
    /// merges root statistics afterwards.
    pub trees: u32,

    pub determinization: Determinization,

    pub horizon: RolloutHorizon,

    /// Hard cap on moves per rollout.
    pub max_rollout_moves: u32,

    /// Scale of the random term added to selection scores so equal
    /// scores do not always resolve to the first child.
    pub jitter: f64,

    /// Random seed. Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: 0.7,
            iterations: 1000,
            trees: 1,
            determinization: Determinization::PerIteration,
            horizon: RolloutHorizon::GameEnd,
            max_rollout_moves: 10_000,
            jitter: 1e-6,
            seed: 42,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_trees(mut self, trees: u32) -> Self {
        self.trees = trees;
        self
    }

    #[must_use]
    pub fn with_determinization(mut self, determinization: Determinization) -> Self {
        self.determinization = determinization;
        self
    }

    #[must_use]
    pub fn with_horizon(mut self, horizon: RolloutHorizon) -> Self {
        self.horizon = horizon;
        self
    }

    #[must_use]
    pub fn with_max_rollout_moves(mut self, moves: u32) -> Self {
        self.max_rollout_moves = moves;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::Zero("iterations"));
        }
        if self.trees == 0 {
            return Err(ConfigError::Zero("trees"));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(ConfigError::Exploration(self.exploration));
        }
        Ok(())
    }
}

/// Flat Monte Carlo configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlatMcConfig {
    /// Determinized playouts per legal move.
    pub samples_per_move: u32,

    /// Hard cap on moves per playout.
    pub max_rollout_moves: u32,

    pub seed: u64,
}

impl Default for FlatMcConfig {
    fn default() -> Self {
        Self {
            samples_per_move: 70,
            max_rollout_moves: 10_000,
            seed: 42,
        }
    }
}

impl FlatMcConfig {
    #[must_use]
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples_per_move = samples;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_per_move == 0 {
            return Err(ConfigError::Zero("samples_per_move"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert!((config.exploration - 0.7).abs() < 1e-12);
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.trees, 1);
        assert_eq!(config.determinization, Determinization::PerIteration);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_exploration(1.4)
            .with_iterations(200)
            .with_trees(4)
            .with_horizon(RolloutHorizon::ChallengeEnd)
            .with_seed(123);

        assert_eq!(config.exploration, 1.4);
        assert_eq!(config.iterations, 200);
        assert_eq!(config.trees, 4);
        assert_eq!(config.horizon, RolloutHorizon::ChallengeEnd);
        assert_eq!(config.seed, 123);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_iters = SearchConfig::default().with_iterations(0);
        assert_eq!(zero_iters.validate(), Err(ConfigError::Zero("iterations")));

        let zero_trees = SearchConfig::default().with_trees(0);
        assert_eq!(zero_trees.validate(), Err(ConfigError::Zero("trees")));

        let nan = SearchConfig::default().with_exploration(f64::NAN);
        assert!(matches!(nan.validate(), Err(ConfigError::Exploration(_))));

        assert!(FlatMcConfig::default().with_samples(0).validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = SearchConfig::default()
            .with_determinization(Determinization::PerTree)
            .with_trees(3);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
