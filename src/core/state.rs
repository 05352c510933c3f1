//! Game state.
//!
//! ## GameState
//!
//! Complete game state including:
//! - Shared deck (draw and discard piles per family)
//! - Per-player hand, board, score and affinity
//! - The current challenge with its round and event flags
//! - Revealed events and move history
//! - RNG
//!
//! Boards, discard piles, revealed events and scores are public. Hands and
//! draw-pile order are hidden; `determinize` re-deals them for one
//! observer.
//!
//! Moves are applied with `perform` / `try_perform` (see `effects`), and
//! generated with `legal_moves` (see `rules::movegen`).

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::config::GameConfig;
use super::error::{ConfigError, RulesError};
use super::moves::{Move, MoveRecord};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Affinity, CardCatalog, CardDefinition, CardRef, Family, Special};
use crate::rules::{movegen, scoring, Challenge, GameResult, Round};
use crate::zones::{Board, Deck, Hand};

/// Everything one seat owns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hand: Hand,
    pub board: Board,
    /// Running game score.
    pub score: u32,
    /// Faction fixed by the first aligned character on the board.
    pub affinity: Affinity,
    /// Must discard two cards before doing anything else.
    pub owes_discard: bool,
}

impl PlayerState {
    /// Affinity check for playing `card` from hand.
    #[must_use]
    pub fn can_play(&self, card: &CardDefinition) -> bool {
        card.affinity == Affinity::None
            || self.affinity == Affinity::None
            || card.affinity == self.affinity
            || self.board.has_special(Special::IgnoreAffinity)
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.board.card_count()
    }
}

/// Complete game state.
///
/// Cloning is cheap enough for search: hands and boards are small, and
/// the catalog and history are shared.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) catalog: Arc<CardCatalog>,
    pub(crate) config: GameConfig,
    pub(crate) deck: Deck,
    pub(crate) players: PlayerMap<PlayerState>,
    pub(crate) challenge: Challenge,
    /// Events revealed so far, oldest first.
    pub(crate) events: Vector<CardRef>,
    pub(crate) history: Vector<MoveRecord>,
    pub(crate) rng: GameRng,
    pub(crate) sequence: u32,
}

impl GameState {
    /// Shuffle, pick a random first challenger, deal and reveal the first
    /// event.
    pub fn new(
        catalog: Arc<CardCatalog>,
        config: GameConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(catalog, config, seed))
    }

    /// A game with the standard deck and hand sizes.
    ///
    /// Panics if `player_count` is unsupported.
    #[must_use]
    pub fn standard(player_count: usize, seed: u64) -> Self {
        Self::build(
            Arc::new(CardCatalog::standard()),
            GameConfig::new(player_count),
            seed,
        )
    }

    fn build(catalog: Arc<CardCatalog>, config: GameConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let deck = Deck::new(&catalog, &mut rng);
        let player_count = config.player_count;
        let challenger = PlayerId::new(rng.gen_range_usize(0..player_count) as u8);

        let mut state = Self {
            catalog,
            config,
            deck,
            players: PlayerMap::with_default(player_count),
            challenge: Challenge::new(player_count, challenger),
            events: Vector::new(),
            history: Vector::new(),
            rng,
            sequence: 0,
        };
        state.open_challenge();
        state
    }

    // === Accessors ===

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn shared_catalog(&self) -> &Arc<CardCatalog> {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerState> {
        &self.players
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        self.challenge.round()
    }

    /// Seat to move.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.round().current()
    }

    #[must_use]
    pub fn events(&self) -> &Vector<CardRef> {
        &self.events
    }

    /// The event governing the current challenge.
    #[must_use]
    pub fn current_event(&self) -> Option<CardRef> {
        self.events.last().copied()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Number of moves performed so far.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        PlayerMap::new(self.player_count(), |p| self.players[p].score)
    }

    /// Played value of a board under the current event.
    #[must_use]
    pub fn played_value(&self, player: PlayerId) -> u32 {
        self.players[player]
            .board
            .played_value(&self.catalog, self.challenge.valuation())
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.round().is_game_over()
    }

    /// Final result, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.is_game_over()
            .then(|| scoring::game_result(&self.scores()))
    }

    /// Seat with the single highest score right now.
    #[must_use]
    pub fn leader(&self) -> Option<PlayerId> {
        scoring::unique_leader(&self.scores())
    }

    /// Moves available to the player to move. Empty once the game is over.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(self)
    }

    // === Card accounting ===

    /// Every card the state holds, wherever it is.
    pub fn cards(&self) -> impl Iterator<Item = CardRef> + '_ {
        self.deck
            .cards()
            .chain(self.players.values().flat_map(|p| p.hand.iter()))
            .chain(self.players.values().flat_map(|p| p.board.cards()))
            .chain(self.events.iter().copied())
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    /// Check structural invariants: every card exactly once, board masks
    /// in sync and sane turn bookkeeping.
    pub fn validate(&self) -> Result<(), RulesError> {
        let expected = self.catalog.len();
        let mut seen = vec![false; expected];
        let mut found = 0;
        for card in self.cards() {
            found += 1;
            match seen.get_mut(card.index()) {
                Some(slot) if *slot => return Err(RulesError::DuplicateCard(card)),
                Some(slot) => *slot = true,
                None => return Err(RulesError::CardCount { expected, found }),
            }
        }
        if found != expected {
            return Err(RulesError::CardCount { expected, found });
        }

        for (player, seat) in self.players.iter() {
            if *seat.board.masks() != seat.board.computed_masks() {
                return Err(RulesError::StaleMasks(player));
            }
        }
        if !self.round().is_consistent() {
            return Err(RulesError::RoundState);
        }
        Ok(())
    }

    // === Staging ===

    /// Return every hand to the draw piles and drop pending discards.
    /// Together with `deal_card` this sets up specific positions.
    pub fn collect_hands(&mut self) {
        for seat in self.players.values_mut() {
            let characters = std::mem::take(seat.hand.characters_mut());
            let skills = std::mem::take(seat.hand.skills_mut());
            self.deck
                .draw_pile_mut(Family::Character)
                .extend(characters);
            self.deck.draw_pile_mut(Family::Skill).extend(skills);
            seat.owes_discard = false;
        }
    }

    /// Move a specific card from the deck into a player's hand.
    pub fn deal_card(&mut self, player: PlayerId, card: CardRef) -> Result<(), RulesError> {
        let def = self
            .catalog
            .lookup(card.0)
            .ok_or(RulesError::NotInDeck(card))?;
        if !self.deck.take(card, def.family()) {
            return Err(RulesError::NotInDeck(card));
        }
        self.players[player].hand.insert(def);
        Ok(())
    }

    /// Place (or lift) a pending double discard on a player, as the
    /// discard-two event does.
    pub fn set_owes_discard(&mut self, player: PlayerId, owes: bool) {
        self.players[player].owes_discard = owes;
    }

    // === Hidden information ===

    /// Re-deal everything `observer` cannot see.
    ///
    /// Opponents' hands are pooled with the character and skill draw
    /// piles, shuffled and dealt back so each opponent keeps as many
    /// characters and skills as before. The event pile is shuffled and the
    /// state gets a fresh RNG stream. Boards, discards, scores, revealed
    /// events and the observer's own hand are untouched.
    pub fn determinize(&mut self, observer: PlayerId, rng: &mut GameRng) {
        for family in [Family::Character, Family::Skill] {
            let mut pool = std::mem::take(self.deck.draw_pile_mut(family));
            let mut counts = Vec::with_capacity(self.player_count());

            for (player, seat) in self.players.iter_mut() {
                if player == observer {
                    continue;
                }
                let cards = match family {
                    Family::Character => seat.hand.characters_mut(),
                    _ => seat.hand.skills_mut(),
                };
                counts.push((player, cards.len()));
                pool.append(cards);
            }

            rng.shuffle(&mut pool);
            for (player, count) in counts {
                let hand = &mut self.players[player].hand;
                let cards = match family {
                    Family::Character => hand.characters_mut(),
                    _ => hand.skills_mut(),
                };
                cards.extend(pool.drain(pool.len() - count..));
            }
            *self.deck.draw_pile_mut(family) = pool;
        }

        rng.shuffle(self.deck.draw_pile_mut(Family::Event));
        self.rng = rng.fork();
        trace!(%observer, "determinized hidden cards");
    }

    /// Replace the state's RNG stream.
    pub fn reseed(&mut self, rng: GameRng) {
        self.rng = rng;
    }
}
