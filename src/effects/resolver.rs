//! Move resolution: the `perform` pipeline.
//!
//! Each step of a move is resolved in three parts. The played card (if
//! any) leaves the actor's hand first, then the step's action runs, then
//! the card is placed according to its type: characters join the board,
//! styles and weapons attach to the position in the first argument slot,
//! wrenches go to the discard pile. Running the action before placement
//! keeps a clear-field character out of its own sweep.
//!
//! After all steps the round advances. A finished challenge is scored and
//! the next one dealt (see `events`).

use tracing::debug;

use crate::cards::{Action, Affinity, CardRef, CardType, Family};
use crate::core::{GameState, Move, MoveRecord, PlayerId, RulesError, Step, DRAW_CHARACTER, DRAW_SKILL};
use crate::zones::Board;

/// Applies move steps to game state.
pub struct MoveResolver;

impl MoveResolver {
    /// Resolve one step of a move made by `actor`.
    pub fn resolve_step(
        state: &mut GameState,
        actor: PlayerId,
        step: &Step,
    ) -> Result<(), RulesError> {
        if let Some(card) = step.card {
            if !state.players[actor].hand.remove(card) {
                return Err(RulesError::CardNotInHand {
                    player: actor,
                    card,
                });
            }
        }

        debug!(
            player = actor.0,
            action = ?step.action,
            card = ?step.card,
            args = ?step.args,
            "resolve step"
        );

        match step.action {
            Action::None
            | Action::PlayCharacter
            | Action::PlayStyle
            | Action::PlayWeapon
            | Action::PlayWeaponRetain => {}
            Action::Pass => state.challenge.round_mut().pass(),
            Action::Concede => state.challenge.round_mut().concede(),
            Action::DiscardOne => Self::discard_one(state, actor, step)?,
            Action::DrawCard => Self::draw_card(state, actor, step.args[0])?,
            Action::StealCard => Self::steal(state, actor, step.arg(0))?,
            Action::TradeHand => Self::trade(state, actor, step.arg(0))?,
            Action::KnockoutCharacter => {
                Self::knockout_character(state, actor, step.arg(0), step.arg(1))?;
            }
            Action::KnockoutStyle => Self::knockout_style(state, actor, step.arg(0), step.arg(1))?,
            Action::KnockoutWeapon => {
                Self::knockout_weapon(state, actor, step.arg(0), step.arg(1), false)?;
            }
            Action::CaptureWeapon => {
                let capture = state.config.rules.capture_weapon;
                Self::knockout_weapon(state, actor, step.arg(0), step.arg(1), capture)?;
            }
            Action::DisarmCharacter => Self::disarm(state, actor, step.arg(0), step.arg(1))?,
            Action::ClearField => Self::clear_field(state, actor),
            action => return Err(RulesError::NotAMoveAction(action)),
        }

        if let Some(card) = step.card {
            Self::place(state, actor, card, step)?;
        }
        Ok(())
    }

    fn place(
        state: &mut GameState,
        actor: PlayerId,
        card: CardRef,
        step: &Step,
    ) -> Result<(), RulesError> {
        let def = &state.catalog[card];
        let seat = &mut state.players[actor];

        match def.card_type {
            CardType::Character => {
                if seat.board.place_character(def).is_none() {
                    return Err(RulesError::NoSuchPosition {
                        player: actor,
                        position: Board::CAPACITY,
                    });
                }
                if seat.affinity == Affinity::None {
                    seat.affinity = def.affinity;
                }
            }
            CardType::Style | CardType::Weapon => {
                let position = step.arg(0);
                if position >= seat.board.len() {
                    return Err(RulesError::NoSuchPosition {
                        player: actor,
                        position,
                    });
                }
                if def.card_type == CardType::Style {
                    seat.board.place_style(card, position);
                } else {
                    seat.board.place_weapon(card, position);
                }
            }
            CardType::Wrench => state.deck.discard(card, &state.catalog),
            actual => {
                return Err(RulesError::WrongCardType {
                    card,
                    expected: CardType::Wrench,
                    actual,
                })
            }
        }
        Ok(())
    }

    /// Resolve an opponent seat argument.
    fn opponent(state: &GameState, actor: PlayerId, seat: usize) -> Result<PlayerId, RulesError> {
        if seat >= state.player_count() || seat == actor.index() {
            return Err(RulesError::InvalidTarget {
                player: actor,
                seat,
            });
        }
        Ok(PlayerId::new(seat as u8))
    }

    /// A discard with no played card is one half of a forced double discard.
    fn discard_one(state: &mut GameState, actor: PlayerId, step: &Step) -> Result<(), RulesError> {
        let hand = &mut state.players[actor].hand;
        let index = step.arg(0);
        let len = hand.len();
        let card = hand.remove_at(index).ok_or(RulesError::HandIndex {
            player: actor,
            index,
            len,
        })?;
        state.deck.discard(card, &state.catalog);

        if step.card.is_none() {
            state.players[actor].owes_discard = false;
        }
        Ok(())
    }

    fn draw_card(state: &mut GameState, actor: PlayerId, pile: u8) -> Result<(), RulesError> {
        let family = match pile {
            DRAW_CHARACTER => Family::Character,
            DRAW_SKILL => Family::Skill,
            other => return Err(RulesError::UnknownFamily(other)),
        };
        state.draw_to_hand(actor, family);
        Ok(())
    }

    fn steal(state: &mut GameState, actor: PlayerId, seat: usize) -> Result<(), RulesError> {
        let target = Self::opponent(state, actor, seat)?;
        if let Some(card) = state.players[target].hand.take_random(&mut state.rng) {
            state.players[actor].hand.insert(&state.catalog[card]);
        }
        Ok(())
    }

    fn trade(state: &mut GameState, actor: PlayerId, seat: usize) -> Result<(), RulesError> {
        let target = Self::opponent(state, actor, seat)?;
        let (mine, theirs) = state.players.pair_mut(actor, target);
        std::mem::swap(&mut mine.hand, &mut theirs.hand);
        Ok(())
    }

    fn knockout_character(
        state: &mut GameState,
        actor: PlayerId,
        seat: usize,
        position: usize,
    ) -> Result<(), RulesError> {
        let target = Self::opponent(state, actor, seat)?;
        let victim = &mut state.players[target];
        let card = victim
            .board
            .remove_character(position)
            .ok_or(RulesError::NothingToRemove {
                player: target,
                position,
                what: "bare character",
            })?;
        if victim.board.is_empty() {
            victim.affinity = Affinity::None;
        }
        state.deck.discard(card, &state.catalog);
        Ok(())
    }

    fn knockout_style(
        state: &mut GameState,
        actor: PlayerId,
        seat: usize,
        position: usize,
    ) -> Result<(), RulesError> {
        let target = Self::opponent(state, actor, seat)?;
        let card = state.players[target]
            .board
            .remove_style(position)
            .ok_or(RulesError::NothingToRemove {
                player: target,
                position,
                what: "style",
            })?;
        state.deck.discard(card, &state.catalog);
        Ok(())
    }

    /// Remove the top weapon at a position. A capture takes it into the
    /// actor's hand; otherwise it is released to its owner.
    fn knockout_weapon(
        state: &mut GameState,
        actor: PlayerId,
        seat: usize,
        position: usize,
        capture: bool,
    ) -> Result<(), RulesError> {
        let target = Self::opponent(state, actor, seat)?;
        let card = state.players[target]
            .board
            .remove_weapon(position)
            .ok_or(RulesError::NothingToRemove {
                player: target,
                position,
                what: "weapon",
            })?;

        if capture {
            state.players[actor].hand.insert(&state.catalog[card]);
        } else {
            Self::release(state, target, card);
        }
        Ok(())
    }

    fn disarm(
        state: &mut GameState,
        actor: PlayerId,
        seat: usize,
        position: usize,
    ) -> Result<(), RulesError> {
        let target = Self::opponent(state, actor, seat)?;
        if !state.config.rules.disarm {
            return Ok(());
        }
        if state.players[target].board.disarm(position) {
            Ok(())
        } else {
            Err(RulesError::NoSuchPosition {
                player: target,
                position,
            })
        }
    }

    fn clear_field(state: &mut GameState, actor: PlayerId) {
        let seat = &mut state.players[actor];
        let cards = seat.board.clear();
        seat.affinity = Affinity::None;
        for card in cards {
            Self::release(state, actor, card);
        }
    }

    /// A card leaving `owner`'s board mid-challenge: retain weapons go back
    /// to the owner's hand, everything else is discarded.
    fn release(state: &mut GameState, owner: PlayerId, card: CardRef) {
        let def = &state.catalog[card];
        if state.config.rules.retain_weapon && def.action == Action::PlayWeaponRetain {
            state.players[owner].hand.insert(def);
        } else {
            state.deck.discard(card, &state.catalog);
        }
    }
}

impl GameState {
    /// Perform a move, leaving the state untouched if it is rejected.
    pub fn try_perform(&mut self, mv: &Move) -> Result<(), RulesError> {
        let mut next = self.clone();
        next.apply_move(mv)?;
        *self = next;
        Ok(())
    }

    /// Perform a move produced by `legal_moves`.
    ///
    /// Panics if the move does not fit the state. Debug builds also check
    /// card conservation after every move.
    pub fn perform(&mut self, mv: &Move) {
        if let Err(e) = self.apply_move(mv) {
            panic!("illegal move {mv}: {e}");
        }
        #[cfg(debug_assertions)]
        if let Err(e) = self.validate() {
            panic!("invariant broken after {mv}: {e}");
        }
    }

    fn apply_move(&mut self, mv: &Move) -> Result<(), RulesError> {
        if self.is_game_over() {
            return Err(RulesError::GameOver);
        }
        let actor = self.current_player();
        for step in mv.steps() {
            MoveResolver::resolve_step(self, actor, step)?;
        }

        self.sequence += 1;
        self.history.push_back(MoveRecord {
            player: actor,
            mv: *mv,
            challenge: self.challenge.number(),
            sequence: self.sequence,
        });
        self.advance_turn();
        Ok(())
    }

    fn advance_turn(&mut self) {
        let round = self.challenge.round_mut();
        round.step();
        if round.challenge_finished() {
            self.close_challenge();
        } else if round.finished() {
            round.reset();
        }
    }
}
