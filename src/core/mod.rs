//! Core engine types: players, moves, state, RNG, configuration, errors.
//!
//! The rules live in `rules` and `effects`; this module holds the data
//! they operate on.

pub mod bits;
pub mod config;
pub mod error;
pub mod moves;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{GameConfig, SpecialRules, MAX_PLAYERS};
pub use error::{CodecError, ConfigError, RulesError};
pub use moves::{Move, MoveRecord, Step, DRAW_CHARACTER, DRAW_SKILL};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, PlayerState};
