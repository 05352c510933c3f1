//! Greedy rule-of-thumb play.

use std::cmp::Reverse;

use crate::cards::{Affinity, CardRef};
use crate::core::{GameState, Move, PlayerId};

use super::Agent;

/// Deterministic greedy player.
///
/// - Opening: the cheapest character of the stronger side of the hand,
///   preferring that side, then unaligned characters.
/// - Leading the challenge on played value: pass.
/// - Behind: the move that leaves its own board worth the most, cheaper
///   cards first on ties.
/// - Owing a discard: the least valuable cards.
#[derive(Clone, Debug, Default)]
pub struct HeuristicAgent;

impl HeuristicAgent {
    pub fn new() -> Self {
        Self
    }

    fn card_value(state: &GameState, card: CardRef) -> u32 {
        state
            .challenge()
            .valuation()
            .card_value(&state.catalog()[card])
    }

    fn move_cost(state: &GameState, mv: &Move) -> u32 {
        mv.card().map_or(0, |card| Self::card_value(state, card))
    }

    /// The affinity whose characters in hand are worth more in total.
    fn best_side(state: &GameState, player: PlayerId) -> Affinity {
        let (mut monk, mut clan) = (0, 0);
        for &card in state.player(player).hand.characters() {
            match state.catalog()[card].affinity {
                Affinity::Monk => monk += Self::card_value(state, card),
                Affinity::Clan => clan += Self::card_value(state, card),
                Affinity::None => {}
            }
        }
        match monk.cmp(&clan) {
            std::cmp::Ordering::Greater => Affinity::Monk,
            std::cmp::Ordering::Less => Affinity::Clan,
            std::cmp::Ordering::Equal => Affinity::None,
        }
    }

    fn opening(state: &GameState, player: PlayerId, moves: &[Move]) -> Option<Move> {
        let best = Self::best_side(state, player);
        let rank = |affinity: Affinity| match (best, affinity) {
            (Affinity::None, _) => 0,
            (_, a) if a == best => 0,
            (_, Affinity::None) => 1,
            _ => 2,
        };
        moves
            .iter()
            .filter_map(|mv| mv.card().map(|card| (mv, card)))
            .min_by_key(|(_, card)| {
                (
                    rank(state.catalog()[*card].affinity),
                    Self::card_value(state, *card),
                )
            })
            .map(|(mv, _)| *mv)
    }

    /// Strictly ahead of every standing opponent on played value.
    fn leads(state: &GameState, player: PlayerId) -> bool {
        let mine = state.played_value(player);
        PlayerId::all(state.player_count())
            .filter(|&p| p != player && !state.round().has_conceded(p))
            .all(|p| state.played_value(p) < mine)
    }

    fn improve(state: &GameState, player: PlayerId, moves: &[Move]) -> Option<Move> {
        moves
            .iter()
            .filter(|mv| !mv.is_concede())
            .filter_map(|mv| {
                let mut trial = state.clone();
                trial.try_perform(mv).ok()?;
                Some((*mv, trial.played_value(player)))
            })
            .max_by_key(|(mv, value)| (*value, Reverse(Self::move_cost(state, mv))))
            .map(|(mv, _)| mv)
    }

    /// Cheapest pair (or single card) to throw away.
    fn discard(state: &GameState, player: PlayerId, moves: &[Move]) -> Option<Move> {
        let hand = &state.player(player).hand;
        moves.iter().copied().min_by_key(|mv| {
            mv.steps()
                .filter_map(|step| hand.get(step.arg(0)))
                .map(|card| Self::card_value(state, card))
                .sum::<u32>()
        })
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str {
        "Heuristic"
    }

    fn choose_move(&mut self, state: &GameState) -> Move {
        let moves = state.legal_moves();
        let player = state.current_player();
        let seat = state.player(player);

        let choice = if seat.owes_discard && !seat.hand.is_empty() {
            Self::discard(state, player, &moves)
        } else if seat.board.is_empty() {
            Self::opening(state, player, &moves)
        } else if Self::leads(state, player) {
            Some(Move::pass())
        } else {
            Self::improve(state, player, &moves)
        };

        choice
            .or_else(|| moves.first().copied())
            .unwrap_or_else(Move::pass)
    }
}
