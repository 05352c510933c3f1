//! Effects: how moves and events change the game state.
//!
//! - `MoveResolver`: resolves move steps (`GameState::perform`)
//! - `EventResolver`: applies event cards at the start of a challenge
//!
//! Both operate directly on `GameState`. Illegal input is reported as a
//! `RulesError`; legitimate edge cases such as stealing from an empty hand
//! or drawing from exhausted piles simply do nothing.

mod events;
mod resolver;

pub use events::EventResolver;
pub use resolver::MoveResolver;
