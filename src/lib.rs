//! # rust-monkey
//!
//! A multi-player, imperfect-information trick-taking card game engine with
//! Information Set Monte Carlo Tree Search.
//!
//! ## Design Principles
//!
//! 1. **One Mutation Surface**: `GameState::perform` is the only way the
//!    game changes. Everything else is a query.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context. Games
//!    run with two to four seats.
//!
//! 3. **Value Semantics**: Search clones the whole `GameState`. The card
//!    catalog is the only shared data and it is read-only.
//!
//! ## Architecture
//!
//! - **Information Set MCTS**: Hidden cards are re-dealt per iteration and
//!   a single tree is shared across deals, with availability counts in the
//!   selection rule.
//!
//! - **Forkable RNG**: Every state, tree and worker owns its own
//!   deterministic stream. Same seed, same game.
//!
//! - **Parallel Trees**: Independent trees run on scoped threads and are
//!   merged by move once all of them have joined.
//!
//! ## Modules
//!
//! - `core`: Players, moves, state, RNG, configuration, errors
//! - `cards`: Card definitions and the catalog
//! - `zones`: Deck, hands and boards
//! - `rules`: Turn order, move generation, scoring, `RulesEngine`
//! - `effects`: How moves and events change the state
//! - `mcts`: Information Set Monte Carlo Tree Search
//! - `agents`: Random, naive, heuristic and search-based players

pub mod agents;
pub mod cards;
pub mod core;
pub mod effects;
pub mod mcts;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    CodecError, ConfigError, GameConfig, GameRng, GameState, Move, MoveRecord, PlayerId,
    PlayerMap, PlayerState, RulesError, SpecialRules, Step,
};

pub use crate::cards::{
    Action, Affinity, ArgKind, CardCatalog, CardDefinition, CardRef, CardType, Family, Special,
    NUM_CARDS,
};

pub use crate::zones::{Board, Deck, Hand};

pub use crate::rules::{legal_moves, Challenge, GameResult, Round, RulesEngine};

pub use crate::effects::{EventResolver, MoveResolver};

pub use crate::mcts::{
    Determinization, FlatMcConfig, IsmctsSearch, RolloutHorizon, SearchConfig, SearchStats,
};

pub use crate::agents::{
    play_game, Agent, FlatMonteCarloAgent, HeuristicAgent, IsmctsAgent, NaiveAgent, RandomAgent,
};
