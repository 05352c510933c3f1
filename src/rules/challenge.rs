//! One challenge: a round plus the rule flags set by its event card.

use serde::{Deserialize, Serialize};

use super::round::Round;
use crate::cards::Action;
use crate::core::PlayerId;
use crate::zones::Valuation;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    round: Round,
    /// Styles may not be played.
    pub no_styles: bool,
    /// Weapons may not be played.
    pub no_weapons: bool,
    /// Cards are worth their inverted value.
    pub invert_value: bool,
    /// Every character is worth one more.
    pub character_bonus: bool,
    number: u32,
}

impl Challenge {
    #[must_use]
    pub fn new(player_count: usize, challenger: PlayerId) -> Self {
        Self {
            round: Round::new(player_count, challenger),
            no_styles: false,
            no_weapons: false,
            invert_value: false,
            character_bonus: false,
            number: 1,
        }
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    /// Challenge number, starting at 1.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Start the next challenge with clean flags.
    pub fn reset(&mut self) {
        self.no_styles = false;
        self.no_weapons = false;
        self.invert_value = false;
        self.character_bonus = false;
        self.number += 1;
        self.round.hard_reset();
    }

    /// Set the flag carried by an event action. Returns false for events
    /// that act on players rather than on the challenge rules.
    pub fn apply_event(&mut self, action: Action) -> bool {
        match action {
            Action::NoStyles => self.no_styles = true,
            Action::NoWeapons => self.no_weapons = true,
            Action::InvertValue => self.invert_value = true,
            Action::CharacterBonus => self.character_bonus = true,
            _ => return false,
        }
        true
    }

    #[must_use]
    pub fn valuation(&self) -> Valuation {
        Valuation {
            inverted: self.invert_value,
            character_bonus: self.character_bonus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_flags() {
        let mut c = Challenge::new(3, PlayerId(0));
        assert!(c.apply_event(Action::NoStyles));
        assert!(c.apply_event(Action::InvertValue));
        assert!(!c.apply_event(Action::RandomSteal));

        assert!(c.no_styles);
        assert!(!c.no_weapons);
        assert!(c.valuation().inverted);
        assert!(!c.valuation().character_bonus);
    }

    #[test]
    fn test_reset_clears_flags_and_rotates() {
        let mut c = Challenge::new(3, PlayerId(0));
        c.apply_event(Action::NoWeapons);
        c.apply_event(Action::CharacterBonus);
        c.round_mut().concede();

        c.reset();

        assert!(!c.no_weapons);
        assert!(!c.character_bonus);
        assert_eq!(c.number(), 2);
        assert_eq!(c.round().challenger(), PlayerId(1));
        assert!(!c.round().has_conceded(PlayerId(0)));
    }
}
