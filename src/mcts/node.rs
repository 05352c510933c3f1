//! Search node structure.
//!
//! Nodes live in an arena (`SearchTree`) and refer to each other by
//! `NodeId`, so the tree has no reference cycles and clones cheaply.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Index into the `SearchTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in an information-set search tree.
///
/// Each node stands for the move that reached it. `avails` counts how
/// often the move was legal when its parent was visited, which differs
/// from the parent's visit count once determinizations disagree about
/// what is legal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchNode<M> {
    /// Move that reached this node (`None` at the root).
    pub mv: Option<M>,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Seat that made `mv`.
    pub just_moved: Option<PlayerId>,

    pub children: SmallVec<[NodeId; 8]>,

    /// Rollouts through this node won by `just_moved`.
    pub wins: f64,

    pub visits: u32,

    pub avails: u32,

    /// Depth from root.
    pub depth: u16,
}

impl<M> SearchNode<M> {
    /// Create the root node.
    pub fn root() -> Self {
        Self {
            mv: None,
            parent: NodeId::NONE,
            just_moved: None,
            children: SmallVec::new(),
            wins: 0.0,
            visits: 0,
            avails: 1,
            depth: 0,
        }
    }

    /// Create a child node for `mv`, played by `player`.
    pub fn new(mv: M, parent: NodeId, player: PlayerId, depth: u16) -> Self {
        Self {
            mv: Some(mv),
            parent,
            just_moved: Some(player),
            children: SmallVec::new(),
            wins: 0.0,
            visits: 0,
            avails: 1,
            depth,
        }
    }

    /// Mean win rate (0 when unvisited).
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Record one rollout result.
    pub fn update(&mut self, winner: Option<PlayerId>) {
        self.visits += 1;
        if self.just_moved.is_some() && self.just_moved == winner {
            self.wins += 1.0;
        }
    }
}
