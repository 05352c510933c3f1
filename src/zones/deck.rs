//! Draw and discard piles for the three card families.
//!
//! Cards are drawn from the back of a pile. When a character or skill
//! draw pile runs dry, that family's discard pile is shuffled and slid
//! underneath it. Events are never recycled: running out of events ends
//! the game.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cards::{CardCatalog, CardRef, Family};
use crate::core::GameRng;

/// One ordered pile per family.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    pub events: Vec<CardRef>,
    pub characters: Vec<CardRef>,
    pub skills: Vec<CardRef>,
}

impl Piles {
    #[must_use]
    pub fn get(&self, family: Family) -> &Vec<CardRef> {
        match family {
            Family::Event => &self.events,
            Family::Character => &self.characters,
            Family::Skill => &self.skills,
        }
    }

    pub fn get_mut(&mut self, family: Family) -> &mut Vec<CardRef> {
        match family {
            Family::Event => &mut self.events,
            Family::Character => &mut self.characters,
            Family::Skill => &mut self.skills,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len() + self.characters.len() + self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = CardRef> + '_ {
        self.events
            .iter()
            .chain(&self.characters)
            .chain(&self.skills)
            .copied()
    }
}

/// Draw and discard piles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    draw: Piles,
    discard: Piles,
}

impl Deck {
    /// Put every catalog card into its family's draw pile and shuffle.
    #[must_use]
    pub fn new(catalog: &CardCatalog, rng: &mut GameRng) -> Self {
        let mut draw = Piles::default();
        for card in catalog.iter() {
            draw.get_mut(card.family()).push(card.id);
        }
        rng.shuffle(&mut draw.events);
        rng.shuffle(&mut draw.characters);
        rng.shuffle(&mut draw.skills);

        Self {
            draw,
            discard: Piles::default(),
        }
    }

    /// Draw from a family, recycling its discards if the pile is empty.
    ///
    /// Returns `None` only when both piles of the family are empty.
    pub fn draw(&mut self, family: Family, rng: &mut GameRng) -> Option<CardRef> {
        if self.draw.get(family).is_empty() && family != Family::Event {
            self.recycle(family, rng);
        }
        self.draw.get_mut(family).pop()
    }

    /// Draw the next event card. Events are never recycled.
    pub fn draw_event(&mut self) -> Option<CardRef> {
        self.draw.events.pop()
    }

    /// Shuffle a family's discards and slide them under its draw pile.
    pub fn recycle(&mut self, family: Family, rng: &mut GameRng) {
        let mut recycled = std::mem::take(self.discard.get_mut(family));
        if recycled.is_empty() {
            return;
        }
        trace!(?family, cards = recycled.len(), "reshuffling discards");
        rng.shuffle(&mut recycled);

        let pile = self.draw.get_mut(family);
        recycled.append(pile);
        *pile = recycled;
    }

    /// Put a card on its family's discard pile.
    pub fn discard(&mut self, card: CardRef, catalog: &CardCatalog) {
        self.discard.get_mut(catalog[card].family()).push(card);
    }

    #[must_use]
    pub fn draw_pile(&self, family: Family) -> &[CardRef] {
        self.draw.get(family)
    }

    #[must_use]
    pub fn discard_pile(&self, family: Family) -> &[CardRef] {
        self.discard.get(family)
    }

    /// Pull a specific card out of its family's draw or discard pile.
    pub fn take(&mut self, card: CardRef, family: Family) -> bool {
        for piles in [&mut self.draw, &mut self.discard] {
            let pile = piles.get_mut(family);
            if let Some(i) = pile.iter().position(|&c| c == card) {
                pile.remove(i);
                return true;
            }
        }
        false
    }

    /// Direct access to a draw pile, for redealing hidden cards.
    pub(crate) fn draw_pile_mut(&mut self, family: Family) -> &mut Vec<CardRef> {
        self.draw.get_mut(family)
    }

    /// Number of event cards left to draw.
    #[must_use]
    pub fn events_remaining(&self) -> usize {
        self.draw.events.len()
    }

    /// Total cards in draw and discard piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every card in the deck, draw piles first.
    pub fn cards(&self) -> impl Iterator<Item = CardRef> + '_ {
        self.draw.iter().chain(self.discard.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::NUM_CARDS;

    fn deck() -> (CardCatalog, Deck, GameRng) {
        let catalog = CardCatalog::standard();
        let mut rng = GameRng::new(5);
        let deck = Deck::new(&catalog, &mut rng);
        (catalog, deck, rng)
    }

    #[test]
    fn test_new_deck_holds_everything() {
        let (_, deck, _) = deck();
        assert_eq!(deck.len(), NUM_CARDS);
        assert_eq!(deck.events_remaining(), 12);
        assert_eq!(deck.draw_pile(Family::Character).len(), 62);
        assert!(deck.discard_pile(Family::Skill).is_empty());
    }

    #[test]
    fn test_draw_routes_by_family() {
        let (catalog, mut deck, mut rng) = deck();
        let c = deck.draw(Family::Character, &mut rng).unwrap();
        let s = deck.draw(Family::Skill, &mut rng).unwrap();

        assert!(catalog[c].is_character());
        assert_eq!(catalog[s].family(), Family::Skill);
        assert_eq!(deck.len(), NUM_CARDS - 2);
    }

    #[test]
    fn test_exhaustion_recycles_discards() {
        let (catalog, mut deck, mut rng) = deck();
        let mut drawn = Vec::new();
        while let Some(c) = deck.draw(Family::Character, &mut rng) {
            drawn.push(c);
        }
        assert_eq!(drawn.len(), 62);

        for c in drawn.drain(..3) {
            deck.discard(c, &catalog);
        }
        assert_eq!(deck.discard_pile(Family::Character).len(), 3);

        assert!(deck.draw(Family::Character, &mut rng).is_some());
        assert!(deck.discard_pile(Family::Character).is_empty());
        assert_eq!(deck.draw_pile(Family::Character).len(), 2);
    }

    #[test]
    fn test_recycle_goes_underneath() {
        let (catalog, mut deck, mut rng) = deck();
        let top = *deck.draw_pile(Family::Skill).last().unwrap();
        let discarded = deck.draw(Family::Skill, &mut rng).unwrap();
        assert_eq!(top, discarded);

        let next_top = *deck.draw_pile(Family::Skill).last().unwrap();
        deck.discard(discarded, &catalog);
        deck.recycle(Family::Skill, &mut rng);

        assert_eq!(*deck.draw_pile(Family::Skill).last().unwrap(), next_top);
        assert_eq!(deck.draw_pile(Family::Skill)[0], discarded);
    }

    #[test]
    fn test_take_specific_card() {
        let (catalog, mut deck, mut rng) = deck();
        let drawn = deck.draw(Family::Skill, &mut rng).unwrap();
        deck.discard(drawn, &catalog);

        assert!(deck.take(drawn, Family::Skill));
        assert!(!deck.take(drawn, Family::Skill));
        assert!(deck.take(CardRef(12), Family::Character));
        assert_eq!(deck.len(), NUM_CARDS - 2);
    }

    #[test]
    fn test_events_never_recycle() {
        let (catalog, mut deck, mut rng) = deck();
        let mut last = None;
        while let Some(e) = deck.draw_event() {
            last = Some(e);
        }
        deck.discard(last.unwrap(), &catalog);
        assert!(deck.draw(Family::Event, &mut rng).is_none());
    }
}
