use crate::core::{GameRng, GameState, Move};
use crate::mcts::naive_weights;

use super::Agent;

/// Weighted random play: each card is picked with probability proportional
/// to `1 + value` under the current event. Conceding only happens when
/// nothing else is legal.
#[derive(Clone, Debug)]
pub struct NaiveAgent {
    rng: GameRng,
}

impl NaiveAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for NaiveAgent {
    fn name(&self) -> &str {
        "Naive"
    }

    fn choose_move(&mut self, state: &GameState) -> Move {
        let moves = state.legal_moves();
        let weights = naive_weights(state, &moves);
        let index = self.rng.choose_weighted(&weights).unwrap_or(0);
        moves.get(index).copied().unwrap_or_else(Move::pass)
    }
}
