//! Challenge and game scoring.
//!
//! The standing player with the highest played value takes the challenge
//! and scores the point value (characters only) of every standing board.
//! A tie for the highest value awards nothing. The game goes to the single
//! highest running score; a shared top score is a draw.

use super::engine::GameResult;
use crate::core::{GameState, PlayerId, PlayerMap};

/// How a finished challenge was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChallengeOutcome {
    pub winner: Option<PlayerId>,
    /// Points the winner receives (0 when nobody wins).
    pub award: u32,
    /// The winning played value.
    pub best_value: u32,
}

/// Decide the current challenge from the boards as they stand.
#[must_use]
pub fn score_challenge(state: &GameState) -> ChallengeOutcome {
    let catalog = state.catalog();
    let valuation = state.challenge().valuation();
    let standing = state.round().standing();

    let mut best_value = 0;
    let mut leaders = 0;
    let mut leader = None;
    let mut pot = 0;

    for (player, seat) in state.players().iter() {
        if !standing.contains(player.index()) {
            continue;
        }
        pot += seat.board.played_points(catalog, valuation);

        let value = seat.board.played_value(catalog, valuation);
        if leader.is_none() || value > best_value {
            best_value = value;
            leader = Some(player);
            leaders = 1;
        } else if value == best_value {
            leaders += 1;
        }
    }

    if leaders == 1 {
        ChallengeOutcome {
            winner: leader,
            award: pot,
            best_value,
        }
    } else {
        ChallengeOutcome {
            winner: None,
            award: 0,
            best_value,
        }
    }
}

/// The seat with the single highest score, if there is one.
#[must_use]
pub fn unique_leader(scores: &PlayerMap<u32>) -> Option<PlayerId> {
    let best = scores.values().copied().max()?;
    let mut at_best = scores.iter().filter(|(_, &s)| s == best);
    let (leader, _) = at_best.next()?;
    match at_best.next() {
        Some(_) => None,
        None => Some(leader),
    }
}

#[must_use]
pub fn game_result(scores: &PlayerMap<u32>) -> GameResult {
    match unique_leader(scores) {
        Some(p) => GameResult::Winner(p),
        None => GameResult::Draw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_leader() {
        let mut scores = PlayerMap::with_value(3, 0u32);
        assert_eq!(unique_leader(&scores), None);

        scores[PlayerId(1)] = 7;
        assert_eq!(unique_leader(&scores), Some(PlayerId(1)));

        scores[PlayerId(2)] = 7;
        assert_eq!(unique_leader(&scores), None);
        assert_eq!(game_result(&scores), GameResult::Draw);

        scores[PlayerId(0)] = 9;
        assert_eq!(game_result(&scores), GameResult::Winner(PlayerId(0)));
    }
}
