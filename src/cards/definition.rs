//! Card definitions.
//!
//! A `CardPrototype` describes one face design and how many copies of it
//! exist. The catalog expands prototypes into `CardDefinition`s, one per
//! physical card, each addressed by a `CardRef`.

use serde::{Deserialize, Serialize};

/// Total number of physical cards in a game.
pub const NUM_CARDS: usize = 198;

/// Reference to one physical card. Bounded by `NUM_CARDS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardRef(pub u8);

impl CardRef {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier shared by every copy of the same face design.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrototypeId(pub u16);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Character,
    Style,
    Weapon,
    Wrench,
    Event,
}

impl CardType {
    /// Which deck family this card lives in.
    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            CardType::Character => Family::Character,
            CardType::Style | CardType::Weapon | CardType::Wrench => Family::Skill,
            CardType::Event => Family::Event,
        }
    }
}

/// Deck families. Each has its own draw and discard pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Event,
    Character,
    Skill,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affinity {
    #[default]
    None,
    Monk,
    Clan,
}

/// Passive ability of a character on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Special {
    #[default]
    None,
    Immune,
    DoubleStyles,
    StylePlusOne,
    TwoWeapons,
    DoubleWeaponValue,
    IgnoreAffinity,
    NoStyles,
    NoWeapons,
}

/// What a card (or a move step) does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    #[default]
    None,
    Pass,
    Concede,
    ClearField,
    PlayCharacter,
    StealCard,
    TradeHand,
    DiscardOne,
    DrawCard,
    PlayWeapon,
    PlayStyle,
    DisarmCharacter,
    KnockoutCharacter,
    KnockoutStyle,
    KnockoutWeapon,
    PlayWeaponRetain,
    CaptureWeapon,

    // Event card effects
    DrawTwoSkills,
    NoStyles,
    DrawOneCharacter,
    NoWeapons,
    RandomSteal,
    DiscardTwo,
    CharacterBonus,
    InvertValue,
}

impl Action {
    /// True for the effects carried by event cards.
    #[must_use]
    pub const fn is_event(self) -> bool {
        matches!(
            self,
            Action::DrawTwoSkills
                | Action::NoStyles
                | Action::DrawOneCharacter
                | Action::NoWeapons
                | Action::RandomSteal
                | Action::DiscardTwo
                | Action::CharacterBonus
                | Action::InvertValue
        )
    }
}

/// What a move playing this card has to supply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgKind {
    #[default]
    None,
    Visible,
    RecvStyle,
    RecvWeapon,
    ExposedChar,
    ExposedStyle,
    ExposedWeapon,
    VisibleCharOrHold,
    Opponent,
    OpponentHand,
    Hand,
    DrawPile,
}

/// Value of a card under the "values are flipped" rule.
///
/// Monk and clan characters invert around their faction's scale; a face
/// value of 6 and every non-character card stay unchanged.
#[must_use]
pub fn inverted_value(card_type: CardType, affinity: Affinity, face: u8) -> u8 {
    if card_type != CardType::Character || face == 6 {
        return face;
    }
    match affinity {
        Affinity::Clan => 5u8.saturating_sub(face),
        Affinity::Monk => 7u8.saturating_sub(face),
        Affinity::None => face,
    }
}

/// Immutable definition of one physical card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardRef,
    pub prototype: PrototypeId,
    pub name: String,
    pub card_type: CardType,
    pub affinity: Affinity,
    pub special: Special,
    pub action: Action,
    pub arg_kind: ArgKind,
    pub face_value: u8,
    pub inverted_value: u8,
}

impl CardDefinition {
    /// Value under the current invert rule.
    #[inline]
    #[must_use]
    pub fn value(&self, inverted: bool) -> u8 {
        if inverted {
            self.inverted_value
        } else {
            self.face_value
        }
    }

    #[must_use]
    pub fn family(&self) -> Family {
        self.card_type.family()
    }

    #[must_use]
    pub fn is_character(&self) -> bool {
        self.card_type == CardType::Character
    }
}

impl std::fmt::Display for CardDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}{})", self.name, self.face_value, self.id)
    }
}

/// A face design plus how many copies the deck holds.
///
/// ```
/// use rust_monkey::cards::{Action, Affinity, ArgKind, CardPrototype, Special};
///
/// let runner = CardPrototype::character("Runner", Affinity::Clan, 1)
///     .with_action(Action::StealCard, ArgKind::OpponentHand)
///     .with_quantity(6);
/// assert_eq!(runner.quantity, 6);
/// assert_eq!(runner.special, Special::None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPrototype {
    pub name: String,
    pub quantity: u8,
    pub card_type: CardType,
    pub affinity: Affinity,
    pub special: Special,
    pub action: Action,
    pub arg_kind: ArgKind,
    pub face_value: u8,
}

impl CardPrototype {
    /// Create a single-copy prototype with no ability.
    pub fn new(name: impl Into<String>, card_type: CardType, face_value: u8) -> Self {
        Self {
            name: name.into(),
            quantity: 1,
            card_type,
            affinity: Affinity::None,
            special: Special::None,
            action: Action::None,
            arg_kind: ArgKind::None,
            face_value,
        }
    }

    pub fn character(name: impl Into<String>, affinity: Affinity, face_value: u8) -> Self {
        Self::new(name, CardType::Character, face_value)
            .with_affinity(affinity)
            .with_action(Action::PlayCharacter, ArgKind::None)
    }

    pub fn style(name: impl Into<String>, affinity: Affinity, face_value: u8) -> Self {
        Self::new(name, CardType::Style, face_value)
            .with_affinity(affinity)
            .with_action(Action::PlayStyle, ArgKind::RecvStyle)
    }

    pub fn weapon(name: impl Into<String>, affinity: Affinity, face_value: u8) -> Self {
        Self::new(name, CardType::Weapon, face_value)
            .with_affinity(affinity)
            .with_action(Action::PlayWeapon, ArgKind::RecvWeapon)
    }

    pub fn wrench(name: impl Into<String>, action: Action, arg_kind: ArgKind) -> Self {
        Self::new(name, CardType::Wrench, 0).with_action(action, arg_kind)
    }

    pub fn event(name: impl Into<String>, action: Action) -> Self {
        Self::new(name, CardType::Event, 0).with_action(action, ArgKind::None)
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u8) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_affinity(mut self, affinity: Affinity) -> Self {
        self.affinity = affinity;
        self
    }

    #[must_use]
    pub fn with_special(mut self, special: Special) -> Self {
        self.special = special;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Action, arg_kind: ArgKind) -> Self {
        self.action = action;
        self.arg_kind = arg_kind;
        self
    }

    /// Instantiate one physical copy.
    #[must_use]
    pub fn instantiate(&self, id: CardRef, prototype: PrototypeId) -> CardDefinition {
        CardDefinition {
            id,
            prototype,
            name: self.name.clone(),
            card_type: self.card_type,
            affinity: self.affinity,
            special: self.special,
            action: self.action,
            arg_kind: self.arg_kind,
            face_value: self.face_value,
            inverted_value: inverted_value(self.card_type, self.affinity, self.face_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_value() {
        assert_eq!(inverted_value(CardType::Character, Affinity::Clan, 1), 4);
        assert_eq!(inverted_value(CardType::Character, Affinity::Monk, 2), 5);
        assert_eq!(inverted_value(CardType::Character, Affinity::Monk, 6), 6);
        assert_eq!(inverted_value(CardType::Character, Affinity::None, 3), 3);
        assert_eq!(inverted_value(CardType::Style, Affinity::Monk, 2), 2);
    }

    #[test]
    fn test_families() {
        assert_eq!(CardType::Character.family(), Family::Character);
        assert_eq!(CardType::Wrench.family(), Family::Skill);
        assert_eq!(CardType::Event.family(), Family::Event);
    }

    #[test]
    fn test_instantiate() {
        let proto = CardPrototype::character("Novice", Affinity::Monk, 1).with_quantity(3);
        let card = proto.instantiate(CardRef(10), PrototypeId(2));

        assert_eq!(card.id, CardRef(10));
        assert_eq!(card.value(false), 1);
        assert_eq!(card.value(true), 6);
        assert_eq!(card.action, Action::PlayCharacter);
        assert!(card.is_character());
    }

    #[test]
    fn test_event_actions() {
        assert!(Action::RandomSteal.is_event());
        assert!(!Action::StealCard.is_event());
    }
}
