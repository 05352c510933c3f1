//! Players that choose moves.
//!
//! Every agent sees the full `GameState` but only uses what its seat is
//! allowed to know: the search agents determinize before looking at
//! hidden cards.
//!
//! ```
//! use rust_monkey::agents::{play_game, Agent, NaiveAgent, RandomAgent};
//! use rust_monkey::core::GameState;
//!
//! let mut state = GameState::standard(2, 3);
//! let mut agents: Vec<Box<dyn Agent>> = vec![
//!     Box::new(RandomAgent::new(1)),
//!     Box::new(NaiveAgent::new(2)),
//! ];
//! let result = play_game(&mut state, &mut agents, 100_000);
//! assert!(result.is_some());
//! ```

mod flatmc;
mod heuristic;
mod ismcts;
mod naive;
mod random;

pub use flatmc::FlatMonteCarloAgent;
pub use heuristic::HeuristicAgent;
pub use ismcts::IsmctsAgent;
pub use naive::NaiveAgent;
pub use random::RandomAgent;

use tracing::{debug, trace};

use crate::core::{GameState, Move};
use crate::rules::GameResult;

/// Something that can take a seat at the table.
pub trait Agent {
    fn name(&self) -> &str;

    /// Pick one of `state.legal_moves()` for the player to move.
    fn choose_move(&mut self, state: &GameState) -> Move;
}

/// Play `state` to the end, seat `i` controlled by `agents[i]`.
///
/// Returns `None` if the game is still running after `max_moves` moves.
///
/// # Panics
///
/// Panics if there are fewer agents than seats.
pub fn play_game(
    state: &mut GameState,
    agents: &mut [Box<dyn Agent>],
    max_moves: usize,
) -> Option<GameResult> {
    let mut played = 0;
    while !state.is_game_over() {
        if played >= max_moves {
            debug!(played, "move limit reached");
            return None;
        }
        let player = state.current_player();
        let agent = &mut agents[player.index()];
        let mv = agent.choose_move(state);
        trace!(%player, agent = agent.name(), %mv, "agent move");
        state.perform(&mv);
        played += 1;
    }
    state.result()
}
