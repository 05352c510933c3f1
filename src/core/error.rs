//! Error types.
//!
//! `RulesError` reports moves that contradict the actual game state. The
//! move generator never produces such moves, so callers treat these as
//! programmer errors (`GameState::perform` panics on them).

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::{Action, CardRef, CardType};

/// A move or mutation that is inconsistent with the game state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("{player} does not hold card {card}")]
    CardNotInHand { player: PlayerId, card: CardRef },

    #[error("{player} hand index {index} out of range (hand size {len})")]
    HandIndex { player: PlayerId, index: usize, len: usize },

    #[error("{player} has no board position {position}")]
    NoSuchPosition { player: PlayerId, position: usize },

    #[error("{player} position {position} has no {what} to remove")]
    NothingToRemove {
        player: PlayerId,
        position: usize,
        what: &'static str,
    },

    #[error("seat {seat} is not a valid target for {player}")]
    InvalidTarget { player: PlayerId, seat: usize },

    #[error("card {card} is a {actual:?} and cannot be played as a {expected:?}")]
    WrongCardType {
        card: CardRef,
        expected: CardType,
        actual: CardType,
    },

    #[error("{0:?} cannot be played as a move")]
    NotAMoveAction(Action),

    #[error("draw pile family {0} does not exist")]
    UnknownFamily(u8),

    #[error("the game is over")]
    GameOver,

    #[error("card count mismatch: expected {expected}, found {found}")]
    CardCount { expected: usize, found: usize },

    #[error("card {0} appears more than once")]
    DuplicateCard(CardRef),

    #[error("card {0} is not in the deck")]
    NotInDeck(CardRef),

    #[error("{0} board masks do not match its characters")]
    StaleMasks(PlayerId),

    #[error("turn order bookkeeping is inconsistent")]
    RoundState,
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("player count must be between 2 and {max}, got {count}")]
    PlayerCount { count: usize, max: usize },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("exploration constant must be finite and non-negative, got {0}")]
    Exploration(f64),
}

/// Failure to encode or decode a move.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Bincode(#[from] bincode::Error),

    #[error("card reference {0} is outside the catalog")]
    CardOutOfRange(u8),
}
