//! Challenge lifecycle and event cards.
//!
//! A challenge opens by topping every hand up to its targets and revealing
//! the next event. It closes by scoring, clearing every board and either
//! opening the next challenge or, when no events remain, ending the game.

use tracing::debug;

use crate::cards::{Action, Affinity, CardRef, Family};
use crate::core::{GameState, PlayerId};
use crate::rules::score_challenge;

/// Applies event cards to game state.
pub struct EventResolver;

impl EventResolver {
    /// Apply a freshly revealed event.
    pub fn apply(state: &mut GameState, event: CardRef) {
        let action = state.catalog[event].action;
        debug!(event = %event, ?action, challenge = state.challenge.number(), "event revealed");

        if state.challenge.apply_event(action) {
            return;
        }
        match action {
            Action::DrawOneCharacter => Self::draw_all(state, Family::Character, 1),
            Action::DrawTwoSkills => Self::draw_all(state, Family::Skill, 2),
            Action::DiscardTwo => {
                for seat in state.players.values_mut() {
                    seat.owes_discard = !seat.hand.is_empty();
                }
            }
            Action::RandomSteal => Self::random_steal(state),
            _ => {}
        }
    }

    fn draw_all(state: &mut GameState, family: Family, count: usize) {
        for player in PlayerId::all(state.player_count()) {
            for _ in 0..count {
                state.draw_to_hand(player, family);
            }
        }
    }

    /// Every player with cards gives one at random to the seat on their
    /// left. All cards are taken before any is handed on.
    fn random_steal(state: &mut GameState) {
        let player_count = state.player_count();
        let mut taken = Vec::with_capacity(player_count);
        for player in PlayerId::all(player_count) {
            taken.push(state.players[player].hand.take_random(&mut state.rng));
        }
        for (player, card) in PlayerId::all(player_count).zip(taken) {
            if let Some(card) = card {
                let left = player.next(player_count);
                state.players[left].hand.insert(&state.catalog[card]);
            }
        }
    }
}

impl GameState {
    /// Draw one card of a family into a player's hand. Returns false when
    /// the family is exhausted.
    pub(crate) fn draw_to_hand(&mut self, player: PlayerId, family: Family) -> bool {
        match self.deck.draw(family, &mut self.rng) {
            Some(card) => {
                self.players[player].hand.insert(&self.catalog[card]);
                true
            }
            None => false,
        }
    }

    /// Top hands up and reveal the next event.
    pub(crate) fn open_challenge(&mut self) {
        for seat in self.players.values_mut() {
            seat.owes_discard = false;
        }
        self.deal();

        if let Some(event) = self.deck.draw_event() {
            self.events.push_back(event);
            EventResolver::apply(self, event);
        }
    }

    fn deal(&mut self) {
        let targets = [
            (Family::Character, self.config.target_characters),
            (Family::Skill, self.config.target_skills),
        ];
        for player in PlayerId::all(self.player_count()) {
            for (family, target) in targets {
                loop {
                    let hand = &self.players[player].hand;
                    let held = match family {
                        Family::Character => hand.characters().len(),
                        _ => hand.skills().len(),
                    };
                    if held >= target || !self.draw_to_hand(player, family) {
                        break;
                    }
                }
            }
        }
    }

    /// Score the finished challenge, clear the boards and move on.
    pub(crate) fn close_challenge(&mut self) {
        let outcome = score_challenge(self);
        if let Some(winner) = outcome.winner {
            self.players[winner].score += outcome.award;
        }
        debug!(
            challenge = self.challenge.number(),
            winner = ?outcome.winner,
            award = outcome.award,
            value = outcome.best_value,
            "challenge scored"
        );

        for seat in self.players.values_mut() {
            for card in seat.board.clear() {
                self.deck.discard(card, &self.catalog);
            }
            seat.affinity = Affinity::None;
        }

        if self.deck.events_remaining() == 0 {
            self.challenge.round_mut().set_game_over();
            debug!(scores = ?self.scores(), result = ?self.result(), "game over");
            return;
        }
        self.challenge.reset();
        self.open_challenge();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;
    use crate::rules::{Challenge, GameResult};

    /// Empty hands, every event back in the pile, player 0 to move.
    fn staged(player_count: usize) -> GameState {
        let mut state = GameState::standard(player_count, 31);
        state.collect_hands();
        state.challenge = Challenge::new(player_count, PlayerId(0));
        let revealed: Vec<_> = state.events.iter().copied().collect();
        state.events.clear();
        state.deck.draw_pile_mut(Family::Event).extend(revealed);
        state
    }

    fn event(state: &GameState, name: &str) -> CardRef {
        state.catalog().named(name).next().unwrap()
    }

    /// Reveal a specific event as if it had just been drawn.
    fn reveal(state: &mut GameState, name: &str) {
        let card = event(state, name);
        assert!(state.deck.take(card, Family::Event));
        state.events.push_back(card);
        EventResolver::apply(state, card);
    }

    fn give_named(state: &mut GameState, player: PlayerId, name: &str, n: usize) {
        let card = state.catalog().named(name).nth(n).unwrap();
        state.deal_card(player, card).unwrap();
    }

    #[test]
    fn test_flag_events() {
        let mut state = staged(2);
        reveal(&mut state, "Vow of Silence");
        reveal(&mut state, "Mirror Lake");

        assert!(state.challenge().no_styles);
        assert!(state.challenge().invert_value);
        assert!(!state.challenge().no_weapons);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_draw_events() {
        let mut state = staged(3);
        reveal(&mut state, "Famine");
        reveal(&mut state, "Harvest");

        for (_, seat) in state.players().iter() {
            assert_eq!(seat.hand.characters().len(), 1);
            assert_eq!(seat.hand.skills().len(), 2);
        }
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_discard_two_only_binds_players_with_cards() {
        let mut state = staged(3);
        give_named(&mut state, PlayerId(0), "Novice", 0);
        give_named(&mut state, PlayerId(2), "Palm", 0);
        reveal(&mut state, "Taxes");

        assert!(state.player(PlayerId(0)).owes_discard);
        assert!(!state.player(PlayerId(1)).owes_discard);
        assert!(state.player(PlayerId(2)).owes_discard);
    }

    #[test]
    fn test_random_steal_passes_left() {
        let mut state = staged(3);
        give_named(&mut state, PlayerId(0), "Novice", 0);
        give_named(&mut state, PlayerId(1), "Palm", 0);
        reveal(&mut state, "Chaos");

        let novice = state.catalog().named("Novice").next().unwrap();
        let palm = state.catalog().named("Palm").next().unwrap();
        assert!(state.player(PlayerId(0)).hand.is_empty());
        assert_eq!(state.player(PlayerId(1)).hand.characters(), &[novice]);
        assert_eq!(state.player(PlayerId(2)).hand.skills(), &[palm]);
    }

    #[test]
    fn test_last_event_ends_game() {
        let mut state = staged(2);
        while let Some(e) = state.deck.draw_event() {
            state.events.push_back(e);
        }
        let acolyte = state.catalog().named("Acolyte").next().unwrap();
        assert!(state.deck.take(acolyte, Family::Character));
        let def = state.catalog()[acolyte].clone();
        state.players[PlayerId(1)].board.place_character(&def);

        state.perform(&Move::pass());
        state.perform(&Move::pass());

        assert!(state.is_game_over());
        assert_eq!(state.result(), Some(GameResult::Winner(PlayerId(1))));
        assert_eq!(state.player(PlayerId(1)).score, 2);
        assert!(state.legal_moves().is_empty());
        assert!(state.validate().is_ok());
    }
}
