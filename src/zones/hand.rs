//! A player's concealed cards.
//!
//! Characters and skills are kept apart. Moves address cards by a
//! combined index: characters first, then skills, each in insertion
//! order.

use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardRef, Family};
use crate::core::GameRng;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    characters: Vec<CardRef>,
    skills: Vec<CardRef>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card to the matching half of the hand.
    pub fn insert(&mut self, card: &CardDefinition) {
        match card.family() {
            Family::Character => self.characters.push(card.id),
            Family::Skill | Family::Event => self.skills.push(card.id),
        }
    }

    #[must_use]
    pub fn characters(&self) -> &[CardRef] {
        &self.characters
    }

    #[must_use]
    pub fn skills(&self) -> &[CardRef] {
        &self.skills
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len() + self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Card at a combined index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CardRef> {
        if index < self.characters.len() {
            Some(self.characters[index])
        } else {
            self.skills.get(index - self.characters.len()).copied()
        }
    }

    #[must_use]
    pub fn contains(&self, card: CardRef) -> bool {
        self.characters.contains(&card) || self.skills.contains(&card)
    }

    /// Combined index of a card.
    #[must_use]
    pub fn position(&self, card: CardRef) -> Option<usize> {
        self.characters
            .iter()
            .position(|&c| c == card)
            .or_else(|| {
                self.skills
                    .iter()
                    .position(|&c| c == card)
                    .map(|i| i + self.characters.len())
            })
    }

    /// Remove a specific card. Returns false if it is not held.
    pub fn remove(&mut self, card: CardRef) -> bool {
        match self.position(card) {
            Some(index) => self.remove_at(index).is_some(),
            None => false,
        }
    }

    /// Remove the card at a combined index, keeping the order of the rest.
    pub fn remove_at(&mut self, index: usize) -> Option<CardRef> {
        if index < self.characters.len() {
            Some(self.characters.remove(index))
        } else if index - self.characters.len() < self.skills.len() {
            Some(self.skills.remove(index - self.characters.len()))
        } else {
            None
        }
    }

    /// Remove a uniformly random card.
    pub fn take_random(&mut self, rng: &mut GameRng) -> Option<CardRef> {
        if self.is_empty() {
            return None;
        }
        let index = rng.gen_range_usize(0..self.len());
        self.remove_at(index)
    }

    /// All cards, characters first.
    pub fn iter(&self) -> impl Iterator<Item = CardRef> + '_ {
        self.characters.iter().chain(&self.skills).copied()
    }

    pub(crate) fn characters_mut(&mut self) -> &mut Vec<CardRef> {
        &mut self.characters
    }

    pub(crate) fn skills_mut(&mut self) -> &mut Vec<CardRef> {
        &mut self.skills
    }
}
