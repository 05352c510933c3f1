//! The card catalog.
//!
//! `CardCatalog` maps every `CardRef` to its immutable `CardDefinition`.
//! It is built once, wrapped in an `Arc`, and shared read-only by every
//! game state and search worker.

use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::definition::{
    Action, Affinity, ArgKind, CardDefinition, CardPrototype, CardRef, Family, PrototypeId,
    Special, NUM_CARDS,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog expands to {found} cards, expected {expected}")]
    WrongTotal { expected: usize, found: usize },

    #[error("prototype {0:?} has zero copies")]
    EmptyPrototype(String),
}

/// Immutable table of card definitions indexed by `CardRef`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
    prototypes: Vec<CardPrototype>,
}

impl CardCatalog {
    /// Expand prototypes into physical cards.
    ///
    /// Card references are assigned sequentially in prototype order. The
    /// expansion must produce exactly `NUM_CARDS` cards.
    pub fn from_prototypes(prototypes: Vec<CardPrototype>) -> Result<Self, CatalogError> {
        if let Some(empty) = prototypes.iter().find(|p| p.quantity == 0) {
            return Err(CatalogError::EmptyPrototype(empty.name.clone()));
        }

        let found: usize = prototypes.iter().map(|p| p.quantity as usize).sum();
        if found != NUM_CARDS {
            return Err(CatalogError::WrongTotal {
                expected: NUM_CARDS,
                found,
            });
        }

        Ok(Self::expand(prototypes))
    }

    /// The standard deck.
    #[must_use]
    pub fn standard() -> Self {
        let catalog = Self::expand(standard_prototypes());
        debug_assert_eq!(catalog.len(), NUM_CARDS);
        catalog
    }

    fn expand(prototypes: Vec<CardPrototype>) -> Self {
        let mut cards = Vec::with_capacity(NUM_CARDS);
        for (p, proto) in prototypes.iter().enumerate() {
            for _ in 0..proto.quantity {
                let id = CardRef(cards.len() as u8);
                cards.push(proto.instantiate(id, PrototypeId(p as u16)));
            }
        }
        Self { cards, prototypes }
    }

    /// Look up a card. References are bounded by construction.
    #[inline]
    #[must_use]
    pub fn get(&self, card: CardRef) -> &CardDefinition {
        &self.cards[card.index()]
    }

    /// Look up a raw reference that may be out of range.
    #[must_use]
    pub fn lookup(&self, raw: u8) -> Option<&CardDefinition> {
        self.cards.get(raw as usize)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn prototypes(&self) -> &[CardPrototype] {
        &self.prototypes
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Every copy of the prototype with this name, in id order.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = CardRef> + 'a {
        self.cards
            .iter()
            .filter(move |c| c.name == name)
            .map(|c| c.id)
    }

    /// All references belonging to a deck family, in id order.
    pub fn family(&self, family: Family) -> impl Iterator<Item = CardRef> + '_ {
        self.cards
            .iter()
            .filter(move |c| c.family() == family)
            .map(|c| c.id)
    }
}

impl Index<CardRef> for CardCatalog {
    type Output = CardDefinition;

    fn index(&self, card: CardRef) -> &Self::Output {
        self.get(card)
    }
}

/// Prototype table for the standard deck: 12 events, 62 characters and
/// 124 skills.
#[must_use]
pub fn standard_prototypes() -> Vec<CardPrototype> {
    use Affinity::{Clan, Monk};

    vec![
        // Events
        CardPrototype::event("Famine", Action::DrawOneCharacter).with_quantity(2),
        CardPrototype::event("Harvest", Action::DrawTwoSkills).with_quantity(2),
        CardPrototype::event("Vow of Silence", Action::NoStyles).with_quantity(2),
        CardPrototype::event("Truce", Action::NoWeapons).with_quantity(2),
        CardPrototype::event("Mirror Lake", Action::InvertValue),
        CardPrototype::event("Festival", Action::CharacterBonus),
        CardPrototype::event("Taxes", Action::DiscardTwo),
        CardPrototype::event("Chaos", Action::RandomSteal),
        // Monk characters
        CardPrototype::character("Novice", Monk, 1).with_quantity(6),
        CardPrototype::character("Acolyte", Monk, 2).with_quantity(6),
        CardPrototype::character("Disciple", Monk, 3)
            .with_special(Special::StylePlusOne)
            .with_quantity(5),
        CardPrototype::character("Brother", Monk, 4)
            .with_special(Special::DoubleStyles)
            .with_quantity(5),
        CardPrototype::character("Elder", Monk, 5)
            .with_special(Special::Immune)
            .with_quantity(3),
        CardPrototype::character("Master", Monk, 6)
            .with_special(Special::IgnoreAffinity)
            .with_quantity(2),
        // Clan characters
        CardPrototype::character("Runner", Clan, 1)
            .with_action(Action::StealCard, ArgKind::OpponentHand)
            .with_quantity(6),
        CardPrototype::character("Thug", Clan, 2)
            .with_special(Special::TwoWeapons)
            .with_quantity(6),
        CardPrototype::character("Enforcer", Clan, 3)
            .with_special(Special::DoubleWeaponValue)
            .with_action(Action::KnockoutCharacter, ArgKind::ExposedChar)
            .with_quantity(5),
        CardPrototype::character("Warlord", Clan, 4)
            .with_special(Special::NoStyles)
            .with_quantity(3),
        // Unaligned characters
        CardPrototype::character("Wanderer", Affinity::None, 1)
            .with_action(Action::DrawCard, ArgKind::DrawPile)
            .with_quantity(4),
        CardPrototype::character("Trader", Affinity::None, 1)
            .with_action(Action::TradeHand, ArgKind::Opponent)
            .with_quantity(3),
        CardPrototype::character("Hermit", Affinity::None, 2)
            .with_action(Action::DiscardOne, ArgKind::Hand)
            .with_quantity(3),
        CardPrototype::character("Sentry", Affinity::None, 2)
            .with_special(Special::NoWeapons)
            .with_action(Action::DisarmCharacter, ArgKind::ExposedChar)
            .with_quantity(3),
        CardPrototype::character("Sweeper", Affinity::None, 3)
            .with_action(Action::ClearField, ArgKind::Visible)
            .with_quantity(2),
        // Styles
        CardPrototype::style("Palm", Affinity::None, 1).with_quantity(10),
        CardPrototype::style("Crane", Monk, 2).with_quantity(10),
        CardPrototype::style("Tiger", Monk, 3).with_quantity(8),
        CardPrototype::style("Feint", Clan, 2).with_quantity(8),
        CardPrototype::style("Fury", Affinity::None, 3).with_quantity(6),
        // Weapons
        CardPrototype::weapon("Staff", Affinity::None, 1).with_quantity(10),
        CardPrototype::weapon("Sword", Clan, 3).with_quantity(8),
        CardPrototype::weapon("Chain", Clan, 2).with_quantity(8),
        CardPrototype::weapon("Spear", Monk, 2).with_quantity(6),
        CardPrototype::weapon("Bow", Affinity::None, 2)
            .with_action(Action::PlayWeaponRetain, ArgKind::VisibleCharOrHold)
            .with_quantity(4),
        // Wrenches
        CardPrototype::wrench("Smash", Action::KnockoutWeapon, ArgKind::ExposedWeapon)
            .with_quantity(8),
        CardPrototype::wrench("Sweep", Action::KnockoutStyle, ArgKind::ExposedStyle)
            .with_quantity(8),
        CardPrototype::wrench("Ambush", Action::KnockoutCharacter, ArgKind::ExposedChar)
            .with_quantity(6),
        CardPrototype::wrench("Pickpocket", Action::StealCard, ArgKind::OpponentHand)
            .with_quantity(6),
        CardPrototype::wrench("Snatch", Action::CaptureWeapon, ArgKind::ExposedWeapon)
            .with_quantity(4),
        CardPrototype::wrench("Scout", Action::DrawCard, ArgKind::DrawPile).with_quantity(6),
        CardPrototype::wrench("Swap", Action::TradeHand, ArgKind::Opponent).with_quantity(4),
        CardPrototype::wrench("Purge", Action::DiscardOne, ArgKind::Hand).with_quantity(4),
    ]
}
