use crate::core::{ConfigError, GameState, Move};
use crate::mcts::{IsmctsSearch, NaiveSimulation, SearchConfig, SearchStats};

use super::Agent;

/// Information-set MCTS player.
pub struct IsmctsAgent {
    search: IsmctsSearch<GameState>,
    name: String,
}

impl IsmctsAgent {
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let name = format!("ISMCTS({}x{})", config.trees, config.iterations);
        Ok(Self {
            search: IsmctsSearch::new(config),
            name,
        })
    }

    /// Use value-weighted rollouts instead of uniform ones.
    #[must_use]
    pub fn with_naive_rollouts(mut self) -> Self {
        self.search = self.search.with_simulation(NaiveSimulation);
        self
    }

    /// Statistics of the most recent decision.
    pub fn stats(&self) -> &SearchStats {
        self.search.stats()
    }
}

impl Agent for IsmctsAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, state: &GameState) -> Move {
        self.search.search(state)
    }
}
