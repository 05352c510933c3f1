//! Information-set MCTS.
//!
//! Each iteration samples a determinization of the hidden cards, then
//! walks a single shared tree using only the moves legal in that sample.
//! Several trees can be searched on scoped threads; their root statistics
//! are merged by move after every worker has joined.

use std::thread;
use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::core::{GameRng, PlayerId};
use crate::rules::RulesEngine;

use super::config::{Determinization, SearchConfig};
use super::node::NodeId;
use super::policy::{rollout, RandomSimulation, SelectionPolicy, SimulationPolicy, Ucb1};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// Root statistics for one move, summed over every tree.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveSummary<M> {
    pub mv: M,
    pub visits: u32,
    pub wins: f64,
    pub avails: u32,
}

/// What one worker hands back after its tree is done.
struct TreeOutcome<M> {
    root: Vec<MoveSummary<M>>,
    stats: SearchStats,
}

/// ISMCTS search context.
///
/// Generic over the rules engine. Owns the configuration, a random stream
/// seeded from it, and the policies. Trees are rebuilt on every call.
pub struct IsmctsSearch<E: RulesEngine> {
    config: SearchConfig,
    rng: GameRng,
    selection: Box<dyn SelectionPolicy>,
    simulation: Box<dyn SimulationPolicy<E>>,
    stats: SearchStats,
    summary: Vec<MoveSummary<E::Move>>,
}

impl<E: RulesEngine> IsmctsSearch<E> {
    /// Create a search with UCB1 selection and random rollouts.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            rng: GameRng::new(config.seed),
            config,
            selection: Box::new(Ucb1),
            simulation: Box::new(RandomSimulation),
            stats: SearchStats::default(),
            summary: Vec::new(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<E> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the last call to `search`.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Merged root statistics of the last call, best move first.
    pub fn root_summary(&self) -> &[MoveSummary<E::Move>] {
        &self.summary
    }

    /// Choose a move for the seat to move in `state`.
    ///
    /// A single legal move is returned without searching. When no tree
    /// produced a usable child the engine's fallback move is returned.
    pub fn search(&mut self, state: &E) -> E::Move {
        let start = Instant::now();
        self.stats.reset();
        self.summary.clear();

        let legal = state.legal_moves();
        match legal.as_slice() {
            [] => return state.fallback_move(),
            [only] => return *only,
            _ => {}
        }

        let observer = state.to_move();
        let mut base = state.clone();
        if self.config.determinization == Determinization::PerCall {
            base.determinize(observer, &mut self.rng);
        }

        let trees = self.config.trees.max(1) as usize;
        let outcomes = if trees == 1 {
            let rng = self.rng.fork();
            vec![run_tree(
                &self.config,
                &*self.selection,
                &*self.simulation,
                base,
                observer,
                rng,
            )]
        } else {
            let seeds: Vec<GameRng> = (0..trees).map(|_| self.rng.fork()).collect();
            let config = &self.config;
            let selection = &*self.selection;
            let simulation = &*self.simulation;
            thread::scope(|scope| {
                let handles: Vec<_> = seeds
                    .into_iter()
                    .map(|rng| {
                        let base = base.clone();
                        scope.spawn(move || {
                            run_tree(config, selection, simulation, base, observer, rng)
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| {
                        handle
                            .join()
                            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                    })
                    .collect::<Vec<_>>()
            })
        };

        let mut merged: FxHashMap<E::Move, MoveSummary<E::Move>> = FxHashMap::default();
        for outcome in &outcomes {
            self.stats.absorb(&outcome.stats);
            for edge in &outcome.root {
                let entry = merged.entry(edge.mv).or_insert(MoveSummary {
                    mv: edge.mv,
                    visits: 0,
                    wins: 0.0,
                    avails: 0,
                });
                entry.visits += edge.visits;
                entry.wins += edge.wins;
                entry.avails += edge.avails;
            }
        }

        // Most visits first; equal visits fall back to move order.
        let mut summary: Vec<_> = merged
            .into_values()
            .filter(|s| legal.contains(&s.mv))
            .collect();
        summary.sort_by(|a, b| b.visits.cmp(&a.visits).then_with(|| a.mv.cmp(&b.mv)));

        let chosen = summary
            .first()
            .map(|s| s.mv)
            .unwrap_or_else(|| state.fallback_move());
        self.summary = summary;
        self.stats.time_us = start.elapsed().as_micros() as u64;

        debug!(
            chosen = ?chosen,
            iterations = self.stats.iterations,
            trees = self.stats.trees,
            elapsed_us = self.stats.time_us,
            "search complete"
        );
        chosen
    }
}

/// Build and search one tree from `base`.
fn run_tree<E: RulesEngine>(
    config: &SearchConfig,
    selection: &dyn SelectionPolicy,
    simulation: &dyn SimulationPolicy<E>,
    mut base: E,
    observer: PlayerId,
    mut rng: GameRng,
) -> TreeOutcome<E::Move> {
    let mut tree = SearchTree::new();
    let mut stats = SearchStats {
        trees: 1,
        ..SearchStats::default()
    };

    if config.determinization == Determinization::PerTree {
        base.determinize(observer, &mut rng);
    }

    for _ in 0..config.iterations {
        let mut state = base.clone();
        if config.determinization == Determinization::PerIteration {
            state.determinize(observer, &mut rng);
        } else {
            state.reseed(rng.fork());
        }
        iterate(&mut tree, state, config, selection, simulation, &mut rng, &mut stats);
        stats.iterations += 1;
    }

    let tree_stats = tree.stats();
    stats.max_depth = tree_stats.max_depth;
    trace!(
        nodes = tree_stats.node_count,
        depth = tree_stats.max_depth,
        root_visits = tree_stats.root_visits,
        "search tree complete"
    );

    let root = tree
        .root_children()
        .filter_map(|node| {
            node.mv.map(|mv| MoveSummary {
                mv,
                visits: node.visits,
                wins: node.wins,
                avails: node.avails,
            })
        })
        .collect();
    TreeOutcome { root, stats }
}

/// Single iteration: select, expand, simulate, backpropagate.
fn iterate<E: RulesEngine>(
    tree: &mut SearchTree<E::Move>,
    mut state: E,
    config: &SearchConfig,
    selection: &dyn SelectionPolicy,
    simulation: &dyn SimulationPolicy<E>,
    rng: &mut GameRng,
    stats: &mut SearchStats,
) {
    let mut node = tree.root();

    while !state.is_over() {
        let legal = state.legal_moves();
        if legal.is_empty() {
            break;
        }

        let untried = tree.untried_moves(node, &legal);
        if !untried.is_empty() {
            let mv = untried[rng.gen_range_usize(0..untried.len())];
            let player = state.to_move();
            state.apply(&mv);
            node = tree.add_child(node, mv, player);
            stats.nodes_expanded += 1;
            break;
        }

        match select_child(tree, node, &legal, config, selection, rng) {
            Some(child) => {
                node = child;
                if let Some(mv) = tree.get(child).mv {
                    state.apply(&mv);
                }
            }
            None => break,
        }
    }

    let played = rollout(
        &mut state,
        simulation,
        config.horizon,
        config.max_rollout_moves,
        rng,
    );
    stats.simulations += 1;
    stats.rollout_moves += u64::from(played);

    let winner = state.leader();
    while !node.is_none() {
        let current = tree.get_mut(node);
        current.update(winner);
        node = current.parent;
    }
}

/// Pick the best-scoring legal child, then count the visit as an
/// opportunity for every legal child.
fn select_child<M: Copy + Eq>(
    tree: &mut SearchTree<M>,
    node: NodeId,
    legal: &[M],
    config: &SearchConfig,
    selection: &dyn SelectionPolicy,
    rng: &mut GameRng,
) -> Option<NodeId> {
    let candidates = tree.legal_children(node, legal);

    let best = candidates
        .iter()
        .map(|&child| {
            let n = tree.get(child);
            let score = selection.score(n.wins, n.visits, n.avails, config.exploration)
                + config.jitter * rng.gen_f64();
            (child, score)
        })
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(child, _)| child);

    for &child in &candidates {
        tree.get_mut(child).avails += 1;
    }
    best
}
