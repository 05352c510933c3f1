//! The interface search algorithms use to drive a game.
//!
//! `RulesEngine` is implemented by `GameState`. Search code is generic
//! over it so the tree, selection and merge logic can be exercised with
//! small toy games as well.

use std::fmt::Debug;
use std::hash::Hash;

use crate::core::{GameRng, GameState, Move, PlayerId};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Shared top score: nobody wins.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// A game that imperfect-information search can play.
///
/// ## Implementation Notes
///
/// - `legal_moves` must be non-empty whenever `is_over` is false
/// - `apply` must only be called with moves from `legal_moves`
/// - `leader` is the unique front-runner, or `None` on a tie; once the
///   game is over it is the final winner
/// - `determinize` must leave everything the observer can see untouched
pub trait RulesEngine: Clone + Send {
    /// Move type. Equality identifies the same decision across
    /// determinizations; ordering breaks ties deterministically.
    type Move: Copy + Eq + Ord + Hash + Debug + Send;

    fn player_count(&self) -> usize;

    /// Seat whose decision it is.
    fn to_move(&self) -> PlayerId;

    fn legal_moves(&self) -> Vec<Self::Move>;

    fn apply(&mut self, mv: &Self::Move);

    fn is_over(&self) -> bool;

    fn leader(&self) -> Option<PlayerId>;

    /// Counter that increases whenever a scoring phase completes. Rollouts
    /// with a short horizon stop when it changes.
    fn epoch(&self) -> u32;

    /// Move used when search has nothing better to offer.
    fn fallback_move(&self) -> Self::Move;

    /// Replace everything `observer` cannot see with a random deal
    /// consistent with what they can.
    fn determinize(&mut self, observer: PlayerId, rng: &mut GameRng);

    /// Give this copy its own random stream.
    fn reseed(&mut self, rng: GameRng);
}

impl RulesEngine for GameState {
    type Move = Move;

    fn player_count(&self) -> usize {
        GameState::player_count(self)
    }

    fn to_move(&self) -> PlayerId {
        self.current_player()
    }

    fn legal_moves(&self) -> Vec<Move> {
        GameState::legal_moves(self)
    }

    fn apply(&mut self, mv: &Move) {
        self.perform(mv);
    }

    fn is_over(&self) -> bool {
        self.is_game_over()
    }

    fn leader(&self) -> Option<PlayerId> {
        match self.result() {
            Some(result) => result.winner(),
            None => GameState::leader(self),
        }
    }

    fn epoch(&self) -> u32 {
        self.challenge().number()
    }

    fn fallback_move(&self) -> Move {
        Move::pass()
    }

    fn determinize(&mut self, observer: PlayerId, rng: &mut GameRng) {
        GameState::determinize(self, observer, rng);
    }

    fn reseed(&mut self, rng: GameRng) {
        GameState::reseed(self, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_winner() {
        let win = GameResult::Winner(PlayerId(2));
        assert!(win.is_winner(PlayerId(2)));
        assert!(!win.is_winner(PlayerId(0)));
        assert_eq!(win.winner(), Some(PlayerId(2)));

        assert!(!GameResult::Draw.is_winner(PlayerId(0)));
        assert_eq!(GameResult::Draw.winner(), None);
    }

    #[test]
    fn test_game_state_engine() {
        let state = GameState::standard(3, 12);
        assert_eq!(RulesEngine::legal_moves(&state), state.legal_moves());
        assert_eq!(RulesEngine::to_move(&state), state.current_player());
        assert_eq!(state.epoch(), 1);
        assert!(!state.is_over());
        assert!(state.fallback_move().is_pass());
    }

    #[test]
    fn test_apply_advances_turn() {
        let mut state = GameState::standard(2, 13);
        let mover = state.current_player();
        let mv = state.legal_moves()[0];
        state.apply(&mv);
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history()[0].player, mover);
    }
}
