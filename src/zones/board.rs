//! A player's face-up played characters and their attachments.
//!
//! Six position masks summarize the board for move generation. They are
//! a pure function of the characters: every placement or removal
//! recomputes the bits of the touched position, and removing a character
//! drops its column from every mask so higher positions shift down.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardCatalog, CardDefinition, CardRef, Special};
use crate::core::bits::PositionMask;

/// A character on the board plus its attachments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCharacter {
    pub card: CardRef,
    pub special: Special,
    pub styles: SmallVec<[CardRef; 4]>,
    pub weapons: SmallVec<[CardRef; 2]>,
    pub immune: bool,
    pub two_weapons: bool,
    pub disarmed: bool,
}

impl PlayedCharacter {
    fn new(card: &CardDefinition) -> Self {
        Self {
            card: card.id,
            special: card.special,
            styles: SmallVec::new(),
            weapons: SmallVec::new(),
            immune: card.special == Special::Immune,
            two_weapons: card.special == Special::TwoWeapons,
            disarmed: false,
        }
    }

    /// No styles or weapons attached.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.styles.is_empty() && self.weapons.is_empty()
    }

    #[must_use]
    pub fn weapon_limit(&self) -> usize {
        if self.two_weapons {
            2
        } else {
            1
        }
    }

    /// Number of cards at this position.
    #[must_use]
    pub fn card_count(&self) -> usize {
        1 + self.styles.len() + self.weapons.len()
    }

    pub fn cards(&self) -> impl Iterator<Item = CardRef> + '_ {
        std::iter::once(self.card)
            .chain(self.styles.iter().copied())
            .chain(self.weapons.iter().copied())
    }
}

/// Per-position summary bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMasks {
    pub recv_style: PositionMask,
    pub recv_weapon: PositionMask,
    pub exposed_char: PositionMask,
    pub exposed_style: PositionMask,
    pub exposed_weapon: PositionMask,
    pub double_style: PositionMask,
}

impl BoardMasks {
    fn assign(&mut self, pos: usize, c: &PlayedCharacter) {
        let targetable = !c.immune;
        let styles_ok = !c.disarmed && c.special != Special::NoStyles;
        let weapons_ok = !c.disarmed && c.special != Special::NoWeapons;

        self.recv_style.assign(pos, styles_ok);
        self.recv_weapon
            .assign(pos, weapons_ok && c.weapons.len() < c.weapon_limit());
        self.double_style
            .assign(pos, styles_ok && c.special == Special::DoubleStyles);
        self.exposed_char.assign(pos, targetable && c.is_bare());
        self.exposed_style
            .assign(pos, targetable && !c.styles.is_empty());
        self.exposed_weapon
            .assign(pos, targetable && !c.weapons.is_empty());
    }

    fn drop_column(&mut self, pos: usize) {
        for mask in [
            &mut self.recv_style,
            &mut self.recv_weapon,
            &mut self.exposed_char,
            &mut self.exposed_style,
            &mut self.exposed_weapon,
            &mut self.double_style,
        ] {
            mask.drop_column(pos);
        }
    }
}

/// Modifiers that change what cards are worth this challenge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    pub inverted: bool,
    pub character_bonus: bool,
}

impl Valuation {
    /// Worth of a bare card under this valuation.
    #[must_use]
    pub fn card_value(&self, card: &CardDefinition) -> u32 {
        let bonus = u32::from(self.character_bonus && card.is_character());
        u32::from(card.value(self.inverted)) + bonus
    }
}

/// A player's board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    characters: SmallVec<[PlayedCharacter; 4]>,
    masks: BoardMasks,
}

impl Board {
    /// Most characters one board can hold.
    pub const CAPACITY: usize = PositionMask::CAPACITY;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn characters(&self) -> &[PlayedCharacter] {
        &self.characters
    }

    #[must_use]
    pub fn masks(&self) -> &BoardMasks {
        &self.masks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.characters.len() >= Self::CAPACITY
    }

    /// Any character on the board has this special.
    #[must_use]
    pub fn has_special(&self, special: Special) -> bool {
        self.characters.iter().any(|c| c.special == special)
    }

    /// Place a character at the next position and return it. Returns
    /// `None` if the board is full.
    pub fn place_character(&mut self, card: &CardDefinition) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let pos = self.characters.len();
        self.characters.push(PlayedCharacter::new(card));
        self.refresh(pos);
        Some(pos)
    }

    /// Attach a style to the character at `pos`.
    pub fn place_style(&mut self, card: CardRef, pos: usize) {
        self.characters[pos].styles.push(card);
        self.refresh(pos);
    }

    /// Attach a weapon to the character at `pos`.
    pub fn place_weapon(&mut self, card: CardRef, pos: usize) {
        self.characters[pos].weapons.push(card);
        self.refresh(pos);
    }

    /// Remove a bare character. Returns `None` if `pos` is empty or the
    /// character still carries attachments.
    pub fn remove_character(&mut self, pos: usize) -> Option<CardRef> {
        if !self.characters.get(pos)?.is_bare() {
            return None;
        }
        let removed = self.characters.remove(pos);
        self.masks.drop_column(pos);
        Some(removed.card)
    }

    /// Remove the most recently attached style at `pos`.
    pub fn remove_style(&mut self, pos: usize) -> Option<CardRef> {
        let card = self.characters.get_mut(pos)?.styles.pop()?;
        self.refresh(pos);
        Some(card)
    }

    /// Remove the most recently attached weapon at `pos`.
    pub fn remove_weapon(&mut self, pos: usize) -> Option<CardRef> {
        let card = self.characters.get_mut(pos)?.weapons.pop()?;
        self.refresh(pos);
        Some(card)
    }

    /// Close the position to further styles and weapons.
    pub fn disarm(&mut self, pos: usize) -> bool {
        match self.characters.get_mut(pos) {
            Some(c) => {
                c.disarmed = true;
                self.refresh(pos);
                true
            }
            None => false,
        }
    }

    /// Empty the board, returning every card it held.
    pub fn clear(&mut self) -> Vec<CardRef> {
        let cards = self.cards().collect();
        self.characters.clear();
        self.masks = BoardMasks::default();
        cards
    }

    fn refresh(&mut self, pos: usize) {
        let c = &self.characters[pos];
        self.masks.assign(pos, c);
    }

    /// Masks rebuilt from nothing; always equal to `masks()`.
    #[must_use]
    pub fn computed_masks(&self) -> BoardMasks {
        let mut masks = BoardMasks::default();
        for (pos, c) in self.characters.iter().enumerate() {
            masks.assign(pos, c);
        }
        masks
    }

    /// Value of one position: character, styles and weapons.
    #[must_use]
    pub fn position_value(&self, pos: usize, catalog: &CardCatalog, valuation: Valuation) -> u32 {
        let c = &self.characters[pos];
        let base = valuation.card_value(&catalog[c.card]);

        let style_bonus = u32::from(c.special == Special::StylePlusOne);
        let styles: u32 = c
            .styles
            .iter()
            .map(|&s| valuation.card_value(&catalog[s]) + style_bonus)
            .sum();

        let weapon_factor = if c.special == Special::DoubleWeaponValue {
            2
        } else {
            1
        };
        let weapons: u32 = c
            .weapons
            .iter()
            .map(|&w| valuation.card_value(&catalog[w]) * weapon_factor)
            .sum();

        base + styles + weapons
    }

    /// Full played value of the board.
    #[must_use]
    pub fn played_value(&self, catalog: &CardCatalog, valuation: Valuation) -> u32 {
        (0..self.characters.len())
            .map(|pos| self.position_value(pos, catalog, valuation))
            .sum()
    }

    /// Point value: characters only.
    #[must_use]
    pub fn played_points(&self, catalog: &CardCatalog, valuation: Valuation) -> u32 {
        self.characters
            .iter()
            .map(|c| valuation.card_value(&catalog[c.card]))
            .sum()
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.characters.iter().map(PlayedCharacter::card_count).sum()
    }

    pub fn cards(&self) -> impl Iterator<Item = CardRef> + '_ {
        self.characters.iter().flat_map(PlayedCharacter::cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(catalog: &CardCatalog, name: &str) -> CardRef {
        catalog.named(name).next().unwrap()
    }

    fn nth(catalog: &CardCatalog, name: &str, n: usize) -> CardRef {
        catalog.named(name).nth(n).unwrap()
    }

    #[test]
    fn test_place_character_sets_masks() {
        let catalog = CardCatalog::standard();
        let mut board = Board::new();

        let pos = board.place_character(&catalog[first(&catalog, "Novice")]);
        assert_eq!(pos, Some(0));

        let m = board.masks();
        assert!(m.recv_style.contains(0));
        assert!(m.recv_weapon.contains(0));
        assert!(m.exposed_char.contains(0));
        assert!(!m.exposed_style.contains(0));
        assert!(!m.double_style.contains(0));
    }

    #[test]
    fn test_full_board_refuses_character() {
        let catalog = CardCatalog::standard();
        let novice = &catalog[first(&catalog, "Novice")];
        let mut board = Board::new();

        for expected in 0..Board::CAPACITY {
            assert_eq!(board.place_character(novice), Some(expected));
        }
        assert!(board.is_full());
        assert_eq!(board.place_character(novice), None);
        assert_eq!(board.len(), Board::CAPACITY);
        assert_eq!(board.masks(), &board.computed_masks());
    }

    #[test]
    fn test_specials_shape_masks() {
        let catalog = CardCatalog::standard();
        let mut board = Board::new();

        board.place_character(&catalog[first(&catalog, "Elder")]);
        board.place_character(&catalog[first(&catalog, "Brother")]);
        board.place_character(&catalog[first(&catalog, "Warlord")]);
        board.place_character(&catalog[first(&catalog, "Sentry")]);

        let m = *board.masks();
        assert!(!m.exposed_char.contains(0), "immune is never exposed");
        assert!(m.double_style.contains(1));
        assert!(!m.recv_style.contains(2), "no-styles refuses styles");
        assert!(!m.recv_weapon.contains(3), "no-weapons refuses weapons");
        assert_eq!(m, board.computed_masks());
    }

    #[test]
    fn test_style_exposes_style_not_char() {
        let catalog = CardCatalog::standard();
        let mut board = Board::new();
        board.place_character(&catalog[first(&catalog, "Novice")]);
        board.place_style(first(&catalog, "Palm"), 0);

        let m = board.masks();
        assert!(!m.exposed_char.contains(0));
        assert!(m.exposed_style.contains(0));

        assert_eq!(board.remove_style(0), Some(first(&catalog, "Palm")));
        assert!(board.masks().exposed_char.contains(0));
        assert!(!board.masks().exposed_style.contains(0));
    }

    #[test]
    fn test_weapon_limit() {
        let catalog = CardCatalog::standard();
        let mut board = Board::new();
        board.place_character(&catalog[first(&catalog, "Thug")]);
        board.place_character(&catalog[first(&catalog, "Novice")]);

        board.place_weapon(nth(&catalog, "Staff", 0), 0);
        assert!(board.masks().recv_weapon.contains(0), "two-weapons takes a second");
        board.place_weapon(nth(&catalog, "Staff", 1), 0);
        assert!(!board.masks().recv_weapon.contains(0));

        board.place_weapon(nth(&catalog, "Staff", 2), 1);
        assert!(!board.masks().recv_weapon.contains(1));

        board.remove_weapon(1);
        assert!(board.masks().recv_weapon.contains(1));
        assert_eq!(*board.masks(), board.computed_masks());
    }

    #[test]
    fn test_remove_character_drops_column() {
        let catalog = CardCatalog::standard();
        let mut board = Board::new();
        board.place_character(&catalog[first(&catalog, "Novice")]);
        board.place_character(&catalog[first(&catalog, "Elder")]);
        board.place_character(&catalog[first(&catalog, "Acolyte")]);
        board.place_style(first(&catalog, "Palm"), 2);

        assert_eq!(board.remove_character(0), Some(first(&catalog, "Novice")));
        assert_eq!(board.len(), 2);
        assert!(board.masks().exposed_style.contains(1));
        assert!(!board.masks().exposed_char.contains(0));
        assert_eq!(*board.masks(), board.computed_masks());
    }

    #[test]
    fn test_cannot_remove_dressed_character() {
        let catalog = CardCatalog::standard();
        let mut board = Board::new();
        board.place_character(&catalog[first(&catalog, "Novice")]);
        board.place_weapon(first(&catalog, "Staff"), 0);

        assert_eq!(board.remove_character(0), None);
        assert_eq!(board.remove_character(3), None);
        assert_eq!(board.card_count(), 2);
    }

    #[test]
    fn test_disarm() {
        let catalog = CardCatalog::standard();
        let mut board = Board::new();
        board.place_character(&catalog[first(&catalog, "Brother")]);
        assert!(board.disarm(0));

        let m = board.masks();
        assert!(!m.recv_style.contains(0));
        assert!(!m.recv_weapon.contains(0));
        assert!(!m.double_style.contains(0));
        assert!(m.exposed_char.contains(0));
        assert!(!board.disarm(1));
    }

    #[test]
    fn test_values() {
        let catalog = CardCatalog::standard();
        let mut board = Board::new();
        // Disciple (3, +1 per style) with Tiger (3); Enforcer (3, double weapons) with Sword (3).
        board.place_character(&catalog[first(&catalog, "Disciple")]);
        board.place_style(first(&catalog, "Tiger"), 0);
        board.place_character(&catalog[first(&catalog, "Enforcer")]);
        board.place_weapon(first(&catalog, "Sword"), 1);

        let plain = Valuation::default();
        assert_eq!(board.position_value(0, &catalog, plain), 3 + 4);
        assert_eq!(board.position_value(1, &catalog, plain), 3 + 6);
        assert_eq!(board.played_value(&catalog, plain), 16);
        assert_eq!(board.played_points(&catalog, plain), 6);

        // Inverted: Disciple 3 -> 4, Enforcer 3 -> 2. Bonus adds 1 per character.
        let flipped = Valuation {
            inverted: true,
            character_bonus: true,
        };
        assert_eq!(board.played_points(&catalog, flipped), 5 + 3);
    }

    #[test]
    fn test_clear_returns_everything() {
        let catalog = CardCatalog::standard();
        let mut board = Board::new();
        board.place_character(&catalog[first(&catalog, "Novice")]);
        board.place_style(first(&catalog, "Palm"), 0);
        board.place_weapon(first(&catalog, "Staff"), 0);

        let cards = board.clear();
        assert_eq!(cards.len(), 3);
        assert!(board.is_empty());
        assert_eq!(*board.masks(), BoardMasks::default());
    }
}
