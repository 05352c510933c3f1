//! Game rules: turn order, move generation and scoring.
//!
//! - `Round` / `Challenge`: whose turn it is and what the current event
//!   changed
//! - `movegen`: every legal move for the player to move
//! - `scoring`: who takes a challenge and who wins the game
//! - `RulesEngine`: the interface search uses to drive any game

pub mod challenge;
pub mod engine;
pub mod movegen;
pub mod round;
pub mod scoring;

pub use challenge::Challenge;
pub use engine::{GameResult, RulesEngine};
pub use movegen::legal_moves;
pub use round::Round;
pub use scoring::{game_result, score_challenge, unique_leader, ChallengeOutcome};
