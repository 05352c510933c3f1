//! Legal move generation.
//!
//! The generator is a pure function of the state. Order of precedence:
//!
//! 1. An empty board with no characters in hand leaves a forced concede,
//!    whatever else is owed.
//! 2. A pending double discard is served next: every unordered pair of
//!    hand positions (or the single card, if only one is held).
//! 3. With an empty board only characters may be played.
//! 4. Otherwise every playable hand card is expanded by its argument
//!    kind, followed by pass and concede.
//!
//! Each expansion yields moves in a fixed order, so the same state always
//! produces the same list.

use crate::cards::{Action, ArgKind, CardDefinition, CardRef, CardType};
use crate::core::{
    GameState, Move, PlayerId, PlayerState, SpecialRules, Step, DRAW_CHARACTER, DRAW_SKILL,
};
use crate::core::bits::PositionMask;
use crate::zones::BoardMasks;

/// All legal moves for the player to move. Empty once the game is over.
#[must_use]
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    if state.is_game_over() {
        return Vec::new();
    }
    let mut gen = MoveGenerator::new(state);
    gen.generate();
    gen.moves
}

/// The action and argument kind a card actually plays with under the
/// active special rules. `None` if the card cannot be played at all.
#[must_use]
pub fn effective_action(card: &CardDefinition, rules: &SpecialRules) -> Option<(Action, ArgKind)> {
    match card.action {
        Action::DisarmCharacter if !rules.disarm => {
            if card.is_character() {
                Some((Action::PlayCharacter, ArgKind::None))
            } else {
                None
            }
        }
        Action::PlayWeaponRetain if !rules.retain_weapon => {
            Some((Action::PlayWeapon, ArgKind::RecvWeapon))
        }
        action => Some((action, card.arg_kind)),
    }
}

struct MoveGenerator<'a> {
    state: &'a GameState,
    actor: PlayerId,
    seat: &'a PlayerState,
    moves: Vec<Move>,
}

impl<'a> MoveGenerator<'a> {
    fn new(state: &'a GameState) -> Self {
        let actor = state.current_player();
        Self {
            state,
            actor,
            seat: state.player(actor),
            moves: Vec::with_capacity(32),
        }
    }

    fn generate(&mut self) {
        let seat = self.seat;

        if seat.board.is_empty() && seat.hand.characters().is_empty() {
            self.moves.push(Move::concede());
            return;
        }

        if seat.owes_discard && !seat.hand.is_empty() {
            self.forced_discards();
            return;
        }

        if seat.board.is_empty() {
            self.opening_moves();
            return;
        }

        for (index, card) in seat.hand.iter().enumerate() {
            self.card_moves(index, card);
        }
        self.moves.push(Move::pass());
        self.moves.push(Move::concede());
    }

    /// Nothing on the board yet: characters only.
    fn opening_moves(&mut self) {
        let seat = self.seat;
        let characters = seat.hand.characters();
        if characters.is_empty() {
            self.moves.push(Move::concede());
            return;
        }
        for (index, &card) in characters.iter().enumerate() {
            self.card_moves(index, card);
        }
        if self.moves.is_empty() {
            self.moves.push(Move::concede());
        }
    }

    fn forced_discards(&mut self) {
        let len = self.seat.hand.len();
        if len == 1 {
            self.moves
                .push(Move::single(Step::bare(Action::DiscardOne, [0, 0])));
            return;
        }
        // Higher index first so the lower one still addresses the same card.
        for i in 0..len {
            for j in i + 1..len {
                self.moves.push(Move::chain(
                    Step::bare(Action::DiscardOne, [j as u8, 0]),
                    Step::bare(Action::DiscardOne, [i as u8, 0]),
                ));
            }
        }
    }

    fn card_moves(&mut self, index: usize, card: CardRef) {
        let state = self.state;
        let def = &state.catalog()[card];
        if !self.seat.can_play(def) {
            return;
        }
        if def.is_character() && self.seat.board.is_full() {
            return;
        }

        let before = self.moves.len();
        if let Some((action, kind)) = effective_action(def, &state.config().rules) {
            self.expand(index, card, action, kind);
        }
        if def.is_character() && self.moves.len() == before {
            self.push(Action::PlayCharacter, card, [0, 0]);
        }
    }

    fn expand(&mut self, index: usize, card: CardRef, action: Action, kind: ArgKind) {
        let masks = *self.seat.board.masks();
        let state = self.state;
        let challenge = state.challenge();

        match kind {
            ArgKind::None | ArgKind::Visible => self.push(action, card, [0, 0]),
            ArgKind::RecvStyle => {
                if !challenge.no_styles {
                    self.style_moves(index, card, action, &masks);
                }
            }
            ArgKind::RecvWeapon | ArgKind::VisibleCharOrHold => {
                if !challenge.no_weapons {
                    for pos in masks.recv_weapon.iter() {
                        self.push(action, card, [pos as u8, 0]);
                    }
                }
            }
            ArgKind::ExposedChar => self.exposed_moves(card, action, |m| m.exposed_char),
            ArgKind::ExposedStyle => self.exposed_moves(card, action, |m| m.exposed_style),
            ArgKind::ExposedWeapon => self.exposed_moves(card, action, |m| m.exposed_weapon),
            ArgKind::Opponent => {
                for seat in opponents(self.actor, state.player_count()) {
                    self.push(action, card, [seat.0, 0]);
                }
            }
            ArgKind::OpponentHand => {
                for seat in opponents(self.actor, state.player_count()) {
                    if !state.player(seat).hand.is_empty() {
                        self.push(action, card, [seat.0, 0]);
                    }
                }
            }
            ArgKind::Hand => {
                // Indices into the hand as it is once `card` has left it.
                let remaining = self.seat.hand.len() - 1;
                for i in 0..remaining {
                    self.push(action, card, [i as u8, 0]);
                }
            }
            ArgKind::DrawPile => {
                self.push(action, card, [DRAW_CHARACTER, 0]);
                self.push(action, card, [DRAW_SKILL, 0]);
            }
        }
    }

    fn style_moves(&mut self, index: usize, card: CardRef, action: Action, masks: &BoardMasks) {
        for pos in masks.recv_style.iter() {
            self.push(action, card, [pos as u8, 0]);
        }

        let (state, seat) = (self.state, self.seat);
        for pos in masks.double_style.iter() {
            let first = Step::with_card(action, card, [pos as u8, 0]);
            for other in seat.hand.iter().skip(index + 1) {
                let def = &state.catalog()[other];
                if def.card_type != CardType::Style || !seat.can_play(def) {
                    continue;
                }
                let second = Step::with_card(def.action, other, [pos as u8, 0]);
                self.moves.push(Move::chain(first, second));
            }
        }
    }

    /// One move per exposed position on every opponent's board.
    fn exposed_moves(&mut self, card: CardRef, action: Action, mask: fn(&BoardMasks) -> PositionMask) {
        let state = self.state;
        for seat in opponents(self.actor, state.player_count()) {
            let exposed = mask(state.player(seat).board.masks());
            for pos in exposed.iter() {
                self.push(action, card, [seat.0, pos as u8]);
            }
        }
    }

    fn push(&mut self, action: Action, card: CardRef, args: [u8; 2]) {
        self.moves.push(Move::play(action, card, args));
    }
}

fn opponents(actor: PlayerId, player_count: usize) -> impl Iterator<Item = PlayerId> {
    PlayerId::all(player_count).filter(move |&p| p != actor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Family;

    /// Two-player game with empty hands, no event flags and player 0 to move.
    fn staged(player_count: usize) -> GameState {
        let mut state = GameState::standard(player_count, 17);
        state.collect_hands();
        state.challenge = crate::rules::Challenge::new(player_count, PlayerId(0));
        state
    }

    fn card(state: &GameState, name: &str, n: usize) -> CardRef {
        state.catalog().named(name).nth(n).unwrap()
    }

    fn give(state: &mut GameState, player: PlayerId, name: &str, n: usize) -> CardRef {
        let c = card(state, name, n);
        state.deal_card(player, c).unwrap();
        c
    }

    fn place(state: &mut GameState, player: PlayerId, name: &str, n: usize) -> CardRef {
        let c = card(state, name, n);
        assert!(state.deck.take(c, Family::Character));
        let def = state.catalog()[c].clone();
        state.players[player].board.place_character(&def);
        c
    }

    #[test]
    fn test_no_characters_forces_concede() {
        let mut state = staged(2);
        give(&mut state, PlayerId(0), "Palm", 0);
        give(&mut state, PlayerId(0), "Staff", 0);

        assert_eq!(legal_moves(&state), vec![Move::concede()]);
    }

    #[test]
    fn test_forced_concede_outranks_owed_discard() {
        let mut state = staged(2);
        give(&mut state, PlayerId(0), "Palm", 0);
        give(&mut state, PlayerId(0), "Staff", 0);
        state.players[PlayerId(0)].owes_discard = true;

        assert_eq!(legal_moves(&state), vec![Move::concede()]);
    }

    #[test]
    fn test_owed_discard_with_empty_board_and_characters() {
        let mut state = staged(2);
        give(&mut state, PlayerId(0), "Novice", 0);
        give(&mut state, PlayerId(0), "Palm", 0);
        state.players[PlayerId(0)].owes_discard = true;

        assert_eq!(
            legal_moves(&state),
            vec![Move::chain(
                Step::bare(Action::DiscardOne, [1, 0]),
                Step::bare(Action::DiscardOne, [0, 0]),
            )]
        );
    }

    #[test]
    fn test_opening_offers_characters_only() {
        let mut state = staged(2);
        let novice = give(&mut state, PlayerId(0), "Novice", 0);
        let acolyte = give(&mut state, PlayerId(0), "Acolyte", 0);
        give(&mut state, PlayerId(0), "Palm", 0);

        let moves = legal_moves(&state);
        assert_eq!(
            moves,
            vec![
                Move::play(Action::PlayCharacter, novice, [0, 0]),
                Move::play(Action::PlayCharacter, acolyte, [0, 0]),
            ]
        );
    }

    #[test]
    fn test_style_expands_over_receiving_positions() {
        let mut state = staged(2);
        place(&mut state, PlayerId(0), "Novice", 0);
        place(&mut state, PlayerId(0), "Warlord", 0);
        place(&mut state, PlayerId(0), "Acolyte", 0);
        state.players[PlayerId(0)].affinity = crate::cards::Affinity::Monk;
        let palm = give(&mut state, PlayerId(0), "Palm", 0);

        let moves = legal_moves(&state);
        let styles: Vec<_> = moves.iter().filter(|m| m.card() == Some(palm)).collect();
        // Warlord at position 1 refuses styles.
        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0].first().args, [0, 0]);
        assert_eq!(styles[1].first().args, [2, 0]);
        assert_eq!(moves[moves.len() - 2], Move::pass());
        assert_eq!(moves[moves.len() - 1], Move::concede());
    }

    #[test]
    fn test_no_styles_flag_blocks_styles() {
        let mut state = staged(2);
        place(&mut state, PlayerId(0), "Novice", 0);
        let palm = give(&mut state, PlayerId(0), "Palm", 0);
        state.challenge.no_styles = true;

        let moves = legal_moves(&state);
        assert!(moves.iter().all(|m| m.card() != Some(palm)));
        assert_eq!(moves, vec![Move::pass(), Move::concede()]);
    }

    #[test]
    fn test_double_style_pairs() {
        let mut state = staged(2);
        place(&mut state, PlayerId(0), "Brother", 0);
        let palm = give(&mut state, PlayerId(0), "Palm", 0);
        let fury = give(&mut state, PlayerId(0), "Fury", 0);

        let moves = legal_moves(&state);
        let pair = Move::chain(
            Step::with_card(Action::PlayStyle, palm, [0, 0]),
            Step::with_card(Action::PlayStyle, fury, [0, 0]),
        );
        assert!(moves.contains(&pair));
        // Palm alone, Palm + Fury, Fury alone, pass, concede.
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_affinity_filters_hand() {
        let mut state = staged(2);
        place(&mut state, PlayerId(0), "Novice", 0);
        state.players[PlayerId(0)].affinity = crate::cards::Affinity::Monk;
        let runner = give(&mut state, PlayerId(0), "Runner", 0);
        let feint = give(&mut state, PlayerId(0), "Feint", 0);
        let crane = give(&mut state, PlayerId(0), "Crane", 0);

        let moves = legal_moves(&state);
        assert!(moves.iter().all(|m| m.card() != Some(runner)));
        assert!(moves.iter().all(|m| m.card() != Some(feint)));
        assert!(moves.iter().any(|m| m.card() == Some(crane)));
    }

    #[test]
    fn test_exposed_targets_on_opponents() {
        let mut state = staged(3);
        place(&mut state, PlayerId(0), "Novice", 0);
        place(&mut state, PlayerId(1), "Acolyte", 0);
        place(&mut state, PlayerId(2), "Elder", 0);
        place(&mut state, PlayerId(2), "Acolyte", 1);
        let ambush = give(&mut state, PlayerId(0), "Ambush", 0);

        let targets: Vec<_> = legal_moves(&state)
            .into_iter()
            .filter(|m| m.card() == Some(ambush))
            .map(|m| m.first().args)
            .collect();
        // Own board is never a target; the immune Elder is hidden.
        assert_eq!(targets, vec![[1, 0], [2, 1]]);
    }

    #[test]
    fn test_character_without_targets_still_plays() {
        let mut state = staged(2);
        place(&mut state, PlayerId(0), "Acolyte", 0);
        let enforcer = give(&mut state, PlayerId(0), "Enforcer", 0);

        let moves = legal_moves(&state);
        assert!(moves.contains(&Move::play(Action::PlayCharacter, enforcer, [0, 0])));
    }

    #[test]
    fn test_hand_targets_renumbered() {
        let mut state = staged(2);
        place(&mut state, PlayerId(0), "Novice", 0);
        give(&mut state, PlayerId(0), "Acolyte", 0);
        let purge = give(&mut state, PlayerId(0), "Purge", 0);
        give(&mut state, PlayerId(0), "Staff", 0);

        let discards: Vec<_> = legal_moves(&state)
            .into_iter()
            .filter(|m| m.card() == Some(purge))
            .map(|m| m.first().args[0])
            .collect();
        assert_eq!(discards, vec![0, 1]);
    }

    #[test]
    fn test_draw_pile_choices() {
        let mut state = staged(2);
        place(&mut state, PlayerId(0), "Novice", 0);
        let scout = give(&mut state, PlayerId(0), "Scout", 0);

        let draws: Vec<_> = legal_moves(&state)
            .into_iter()
            .filter(|m| m.card() == Some(scout))
            .collect();
        assert_eq!(draws.len(), 2);
    }

    #[test]
    fn test_opponent_hand_skips_empty_hands() {
        let mut state = staged(3);
        place(&mut state, PlayerId(0), "Novice", 0);
        give(&mut state, PlayerId(2), "Palm", 0);
        let pickpocket = give(&mut state, PlayerId(0), "Pickpocket", 0);

        let seats: Vec<_> = legal_moves(&state)
            .into_iter()
            .filter(|m| m.card() == Some(pickpocket))
            .map(|m| m.first().args[0])
            .collect();
        assert_eq!(seats, vec![2]);
    }

    #[test]
    fn test_forced_discard_pairs() {
        let mut state = staged(2);
        give(&mut state, PlayerId(0), "Novice", 0);
        give(&mut state, PlayerId(0), "Palm", 0);
        give(&mut state, PlayerId(0), "Staff", 0);
        state.players[PlayerId(0)].owes_discard = true;

        let moves = legal_moves(&state);
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|m| m.action() == Action::DiscardOne && m.second().is_some()));
        assert_eq!(
            moves[0],
            Move::chain(
                Step::bare(Action::DiscardOne, [1, 0]),
                Step::bare(Action::DiscardOne, [0, 0]),
            )
        );
    }

    #[test]
    fn test_disarm_rule_off_plays_plain() {
        let mut state = staged(2);
        state.config.rules = SpecialRules::basic();
        place(&mut state, PlayerId(0), "Novice", 0);
        place(&mut state, PlayerId(1), "Acolyte", 0);
        let sentry = give(&mut state, PlayerId(0), "Sentry", 0);

        let sentry_moves: Vec<_> = legal_moves(&state)
            .into_iter()
            .filter(|m| m.card() == Some(sentry))
            .collect();
        assert_eq!(sentry_moves, vec![Move::play(Action::PlayCharacter, sentry, [0, 0])]);
    }

    #[test]
    fn test_game_over_has_no_moves() {
        let mut state = staged(2);
        state.challenge.round_mut().set_game_over();
        assert!(legal_moves(&state).is_empty());
    }
}
