//! Monte Carlo Tree Search for hidden-information games.
//!
//! ## Overview
//!
//! This module implements Information Set MCTS (ISMCTS):
//!
//! - **Determinization**: hidden cards are resampled per iteration, per
//!   tree or per call, consistent with what the searching seat can see
//! - **Availability counts**: UCB1 uses how often a move was legal rather
//!   than parent visits, so one tree serves every determinization
//! - **Parallel trees**: independent trees on scoped threads, merged by
//!   move after joining
//! - **Generic**: works over any `RulesEngine`, not just `GameState`
//!
//! ## Usage
//!
//! ```rust
//! use rust_monkey::core::GameState;
//! use rust_monkey::mcts::{IsmctsSearch, SearchConfig};
//!
//! let state = GameState::standard(3, 7);
//! let config = SearchConfig::default().with_iterations(50);
//! let mut search: IsmctsSearch<GameState> = IsmctsSearch::new(config);
//!
//! let mv = search.search(&state);
//! assert!(state.legal_moves().contains(&mv));
//! ```
//!
//! ## Custom Policies
//!
//! ```rust,ignore
//! use rust_monkey::mcts::{IsmctsSearch, NaiveSimulation};
//!
//! let search = IsmctsSearch::new(config).with_simulation(NaiveSimulation);
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::{Determinization, FlatMcConfig, RolloutHorizon, SearchConfig};
pub use node::{NodeId, SearchNode};
pub use policy::{
    naive_weights, rollout, ucb1_score, NaiveSimulation, RandomSimulation, SelectionPolicy,
    SimulationPolicy, Ucb1,
};
pub use search::{IsmctsSearch, MoveSummary};
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
