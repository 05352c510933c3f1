use crate::core::{GameRng, GameState, Move};

use super::Agent;

/// Uniform choice over legal moves.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, state: &GameState) -> Move {
        let moves = state.legal_moves();
        self.rng.choose(&moves).copied().unwrap_or_else(Move::pass)
    }
}
