//! Flat Monte Carlo: no tree, just playouts per candidate move.

use tracing::debug;

use crate::core::{ConfigError, GameRng, GameState, Move};
use crate::mcts::{rollout, FlatMcConfig, RandomSimulation, RolloutHorizon};
use crate::rules::RulesEngine;

use super::Agent;

/// Scores every legal move by the share of random playouts it wins.
///
/// Each playout re-deals the hidden cards, plays the candidate and then
/// random moves to the end of the game. Ties count as losses.
#[derive(Clone, Debug)]
pub struct FlatMonteCarloAgent {
    config: FlatMcConfig,
    rng: GameRng,
}

impl FlatMonteCarloAgent {
    pub fn new(config: FlatMcConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: GameRng::new(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &FlatMcConfig {
        &self.config
    }

    fn wins_for(&mut self, state: &GameState, mv: &Move) -> u32 {
        let player = state.current_player();
        let mut wins = 0;
        for _ in 0..self.config.samples_per_move {
            let mut sample = state.clone();
            sample.determinize(player, &mut self.rng);
            sample.perform(mv);
            rollout(
                &mut sample,
                &RandomSimulation,
                RolloutHorizon::GameEnd,
                self.config.max_rollout_moves,
                &mut self.rng,
            );
            if RulesEngine::leader(&sample) == Some(player) {
                wins += 1;
            }
        }
        wins
    }
}

impl Agent for FlatMonteCarloAgent {
    fn name(&self) -> &str {
        "FlatMC"
    }

    fn choose_move(&mut self, state: &GameState) -> Move {
        let moves = state.legal_moves();
        if moves.len() <= 1 {
            return moves.first().copied().unwrap_or_else(Move::pass);
        }

        let scored: Vec<(Move, u32)> = moves
            .iter()
            .map(|mv| (*mv, self.wins_for(state, mv)))
            .collect();

        // Later moves win ties, except that conceding never wins one.
        let best = scored
            .iter()
            .max_by_key(|(mv, wins)| (*wins, !mv.is_concede()))
            .map(|(mv, _)| *mv)
            .unwrap_or_else(Move::pass);

        debug!(
            player = %state.current_player(),
            candidates = moves.len(),
            samples = self.config.samples_per_move,
            chosen = %best,
            "flat monte carlo decision"
        );
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_samples() {
        assert!(FlatMonteCarloAgent::new(FlatMcConfig::default().with_samples(0)).is_err());
    }

    #[test]
    fn test_choice_is_legal() {
        let state = GameState::standard(2, 55);
        let mut agent =
            FlatMonteCarloAgent::new(FlatMcConfig::default().with_samples(3).with_seed(1)).unwrap();
        let mv = agent.choose_move(&state);
        assert!(state.legal_moves().contains(&mv));
    }

    #[test]
    fn test_same_seed_same_choice() {
        let state = GameState::standard(3, 56);
        let config = FlatMcConfig::default().with_samples(4).with_seed(7);
        let mut a = FlatMonteCarloAgent::new(config.clone()).unwrap();
        let mut b = FlatMonteCarloAgent::new(config).unwrap();
        assert_eq!(a.choose_move(&state), b.choose_move(&state));
    }
}
