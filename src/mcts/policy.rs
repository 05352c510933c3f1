//! Search policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to score children during tree descent (UCB1)
//! - `SimulationPolicy`: How to pick moves during rollouts (random, naive)

use crate::core::{GameRng, GameState, Move};
use crate::rules::RulesEngine;

use super::config::RolloutHorizon;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for scoring children during selection. The child with the
/// highest score among the currently legal ones is followed.
pub trait SelectionPolicy: Send + Sync {
    fn score(&self, wins: f64, visits: u32, avails: u32, exploration: f64) -> f64;
}

/// UCB1 with availability counts in place of parent visits.
///
/// Formula: wins/visits + c * sqrt(ln(avails) / visits)
#[derive(Clone, Debug, Default)]
pub struct Ucb1;

impl SelectionPolicy for Ucb1 {
    fn score(&self, wins: f64, visits: u32, avails: u32, exploration: f64) -> f64 {
        ucb1_score(wins, visits, avails, exploration)
    }
}

/// UCB1 score of a child. Unvisited children score infinity.
#[must_use]
pub fn ucb1_score(wins: f64, visits: u32, avails: u32, exploration: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    let visits = visits as f64;
    let ln_avails = (avails.max(1) as f64).ln();
    wins / visits + exploration * (ln_avails / visits).sqrt()
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for choosing moves during rollouts.
pub trait SimulationPolicy<E: RulesEngine>: Send + Sync {
    /// Index into `moves` (never empty) of the move to play.
    fn choose(&self, state: &E, moves: &[E::Move], rng: &mut GameRng) -> usize;
}

/// Uniform random rollouts.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl<E: RulesEngine> SimulationPolicy<E> for RandomSimulation {
    fn choose(&self, _state: &E, moves: &[E::Move], rng: &mut GameRng) -> usize {
        rng.gen_range_usize(0..moves.len())
    }
}

/// Value-weighted rollouts: cards are chosen with probability
/// proportional to `1 + value`, and conceding is avoided while anything
/// else is legal.
#[derive(Clone, Debug, Default)]
pub struct NaiveSimulation;

impl SimulationPolicy<GameState> for NaiveSimulation {
    fn choose(&self, state: &GameState, moves: &[Move], rng: &mut GameRng) -> usize {
        let weights = naive_weights(state, moves);
        rng.choose_weighted(&weights).unwrap_or(0)
    }
}

/// Weight of each move for value-weighted play.
#[must_use]
pub fn naive_weights(state: &GameState, moves: &[Move]) -> Vec<f32> {
    let valuation = state.challenge().valuation();
    moves
        .iter()
        .map(|mv| {
            if mv.is_concede() {
                0.0
            } else if let Some(card) = mv.card() {
                1.0 + valuation.card_value(&state.catalog()[card]) as f32
            } else {
                1.0
            }
        })
        .collect()
}

// =============================================================================
// Rollouts
// =============================================================================

/// Play `state` forward with `policy` until the game ends, the horizon is
/// reached or `max_moves` moves have been made. Returns the number of
/// moves played.
pub fn rollout<E: RulesEngine>(
    state: &mut E,
    policy: &dyn SimulationPolicy<E>,
    horizon: RolloutHorizon,
    max_moves: u32,
    rng: &mut GameRng,
) -> u32 {
    let epoch = state.epoch();
    let mut played = 0;

    while played < max_moves && !state.is_over() {
        if horizon == RolloutHorizon::ChallengeEnd && state.epoch() != epoch {
            break;
        }
        let moves = state.legal_moves();
        if moves.is_empty() {
            break;
        }
        let idx = policy.choose(state, &moves, rng);
        state.apply(&moves[idx]);
        played += 1;
    }
    played
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ucb1_unvisited_is_infinite() {
        assert_eq!(ucb1_score(0.0, 0, 5, 0.7), f64::INFINITY);
    }

    #[test]
    fn test_ucb1_monotonic_in_wins() {
        let low = ucb1_score(2.0, 10, 20, 0.7);
        let high = ucb1_score(3.0, 10, 20, 0.7);
        assert!(high > low);
    }

    #[test]
    fn test_ucb1_exploration_grows_with_avails() {
        let few = ucb1_score(5.0, 10, 10, 0.7);
        let many = ucb1_score(5.0, 10, 1000, 0.7);
        assert!(many > few);

        // Without exploration only the mean counts.
        assert!((ucb1_score(5.0, 10, 1000, 0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_naive_weights_avoid_concede() {
        let state = GameState::standard(3, 5);
        let moves = state.legal_moves();
        let weights = naive_weights(&state, &moves);

        for (mv, w) in moves.iter().zip(&weights) {
            if mv.is_concede() {
                assert_eq!(*w, 0.0);
            } else {
                assert!(*w >= 1.0);
            }
        }
    }

    #[test]
    fn test_naive_simulation_picks_legal_index() {
        let state = GameState::standard(2, 9);
        let moves = state.legal_moves();
        let mut rng = GameRng::new(1);
        for _ in 0..50 {
            let idx = NaiveSimulation.choose(&state, &moves, &mut rng);
            assert!(idx < moves.len());
            assert!(!moves[idx].is_concede());
        }
    }

    #[test]
    fn test_rollout_to_game_end() {
        let mut state = GameState::standard(3, 77);
        let mut rng = GameRng::new(3);
        let played = rollout(
            &mut state,
            &RandomSimulation,
            RolloutHorizon::GameEnd,
            100_000,
            &mut rng,
        );
        assert!(played > 0);
        assert!(state.is_game_over());
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_rollout_stops_at_challenge_end() {
        let mut state = GameState::standard(2, 78);
        let first = state.challenge().number();
        let mut rng = GameRng::new(4);
        rollout(
            &mut state,
            &NaiveSimulation,
            RolloutHorizon::ChallengeEnd,
            100_000,
            &mut rng,
        );
        assert!(state.is_game_over() || state.challenge().number() == first + 1);
    }
}
