//! Where cards live: the shared deck, concealed hands and face-up boards.
//!
//! ## Key Types
//!
//! - `Deck`: Draw and discard piles per family, with reshuffle on exhaustion
//! - `Hand`: A player's concealed characters and skills
//! - `Board`: Played characters with attachments and position masks

pub mod board;
pub mod deck;
pub mod hand;

pub use board::{Board, BoardMasks, PlayedCharacter, Valuation};
pub use deck::{Deck, Piles};
pub use hand::Hand;
