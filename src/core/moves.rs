//! Move representation: one or two chained steps.
//!
//! A step is an action tag, the hand card it plays (if any) and two 8-bit
//! argument slots. Compound decisions (two styles at once, a forced
//! double discard) chain a second step onto the first.
//!
//! Argument slots by action:
//! - style/weapon placement: `[position, 0]` on the actor's board
//! - knockout/disarm/capture: `[seat, position]`
//! - steal/trade: `[seat, 0]`
//! - discard-one: `[hand index, 0]` (characters first, then skills)
//! - draw-card: `[0 = character, 1 = skill, 0]`

use serde::{Deserialize, Serialize};

use super::error::CodecError;
use super::player::PlayerId;
use crate::cards::{Action, CardRef, NUM_CARDS};

/// Draw-card argument selecting the character family.
pub const DRAW_CHARACTER: u8 = 0;
/// Draw-card argument selecting the skill family.
pub const DRAW_SKILL: u8 = 1;

/// One sub-step of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Step {
    pub action: Action,
    pub card: Option<CardRef>,
    pub args: [u8; 2],
}

impl Step {
    /// A step that plays no card.
    #[must_use]
    pub const fn bare(action: Action, args: [u8; 2]) -> Self {
        Self {
            action,
            card: None,
            args,
        }
    }

    /// A step that plays `card` from the actor's hand.
    #[must_use]
    pub const fn with_card(action: Action, card: CardRef, args: [u8; 2]) -> Self {
        Self {
            action,
            card: Some(card),
            args,
        }
    }

    #[inline]
    #[must_use]
    pub fn arg(&self, slot: usize) -> usize {
        self.args[slot] as usize
    }
}

/// A complete decision for the player to move.
///
/// ```
/// use rust_monkey::cards::{Action, CardRef};
/// use rust_monkey::core::{Move, Step};
///
/// let pass = Move::pass();
/// assert!(pass.is_pass());
///
/// let double = Move::chain(
///     Step::with_card(Action::PlayStyle, CardRef(90), [0, 0]),
///     Step::with_card(Action::PlayStyle, CardRef(95), [0, 0]),
/// );
/// assert_eq!(double.steps().count(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move {
    first: Step,
    second: Option<Step>,
}

impl Move {
    #[must_use]
    pub const fn single(step: Step) -> Self {
        Self {
            first: step,
            second: None,
        }
    }

    #[must_use]
    pub const fn chain(first: Step, second: Step) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    #[must_use]
    pub const fn pass() -> Self {
        Self::single(Step::bare(Action::Pass, [0, 0]))
    }

    #[must_use]
    pub const fn concede() -> Self {
        Self::single(Step::bare(Action::Concede, [0, 0]))
    }

    /// Play `card` with the given action and arguments.
    #[must_use]
    pub const fn play(action: Action, card: CardRef, args: [u8; 2]) -> Self {
        Self::single(Step::with_card(action, card, args))
    }

    #[must_use]
    pub fn first(&self) -> &Step {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> Option<&Step> {
        self.second.as_ref()
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        std::iter::once(&self.first).chain(self.second.iter())
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.first.action
    }

    /// Card played by the first step.
    #[must_use]
    pub fn card(&self) -> Option<CardRef> {
        self.first.card
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.first.action == Action::Pass
    }

    #[must_use]
    pub fn is_concede(&self) -> bool {
        self.first.action == Action::Concede
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a move, rejecting card references outside the catalog.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let mv: Move = bincode::deserialize(bytes)?;
        for step in mv.steps() {
            if let Some(card) = step.card {
                if card.index() >= NUM_CARDS {
                    return Err(CodecError::CardOutOfRange(card.0));
                }
            }
        }
        Ok(mv)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, step) in self.steps().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{:?}", step.action)?;
            if let Some(card) = step.card {
                write!(f, " {card}")?;
            }
            write!(f, " [{}, {}]", step.args[0], step.args[1])?;
        }
        Ok(())
    }
}

/// A performed move with its position in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: PlayerId,
    pub mv: Move,
    /// Challenge number, starting at 1.
    pub challenge: u32,
    /// Move sequence within the game.
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_move_equality_and_hash() {
        let a = Move::play(Action::PlayStyle, CardRef(100), [1, 0]);
        let b = Move::play(Action::PlayStyle, CardRef(100), [1, 0]);
        let c = Move::play(Action::PlayStyle, CardRef(100), [2, 0]);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Move> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_chained_move_differs_from_single() {
        let first = Step::with_card(Action::PlayStyle, CardRef(80), [0, 0]);
        let second = Step::with_card(Action::PlayStyle, CardRef(81), [0, 0]);

        assert_ne!(Move::single(first), Move::chain(first, second));
        assert_eq!(Move::chain(first, second).second(), Some(&second));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let mv = Move::chain(
            Step::bare(Action::DiscardOne, [4, 0]),
            Step::bare(Action::DiscardOne, [1, 0]),
        );
        let bytes = mv.to_bytes().unwrap();
        assert_eq!(Move::from_bytes(&bytes).unwrap(), mv);
    }

    #[test]
    fn test_decode_rejects_out_of_range_card() {
        let bogus = Move::play(Action::PlayCharacter, CardRef(250), [0, 0]);
        let bytes = bogus.to_bytes().unwrap();
        assert!(matches!(
            Move::from_bytes(&bytes),
            Err(CodecError::CardOutOfRange(250))
        ));
    }

    #[test]
    fn test_display() {
        let mv = Move::play(Action::KnockoutStyle, CardRef(7), [2, 1]);
        assert_eq!(mv.to_string(), "KnockoutStyle #7 [2, 1]");
        assert_eq!(Move::pass().to_string(), "Pass [0, 0]");
    }
}
