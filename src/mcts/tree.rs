//! Arena-based search tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references for efficiency,
//! cache-friendliness, and serializability.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::node::{NodeId, SearchNode};
use crate::core::PlayerId;

/// Arena-based search tree over moves of type `M`.
///
/// A child is identified by the move that reached it, so the same child is
/// reused by every determinization in which that move is legal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTree<M> {
    nodes: Vec<SearchNode<M>>,
    root: NodeId,
}

impl<M: Copy + Eq> SearchTree<M> {
    /// Create a new tree with a root node.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SearchNode::root());
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<M> {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<M> {
        &mut self.nodes[id.0 as usize]
    }

    /// Add a child of `parent` reached by `mv`, returning its ID.
    pub fn add_child(&mut self, parent: NodeId, mv: M, player: PlayerId) -> NodeId {
        let depth = self.get(parent).depth.saturating_add(1);
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new(mv, parent, player, depth));
        self.get_mut(parent).children.push(id);
        id
    }

    /// The child of `node` reached by `mv`, if it has been expanded.
    #[must_use]
    pub fn child_for(&self, node: NodeId, mv: &M) -> Option<NodeId> {
        self.get(node)
            .children
            .iter()
            .copied()
            .find(|&c| self.get(c).mv.as_ref() == Some(mv))
    }

    /// Legal moves that have no child yet.
    #[must_use]
    pub fn untried_moves(&self, node: NodeId, legal: &[M]) -> Vec<M> {
        legal
            .iter()
            .copied()
            .filter(|mv| self.child_for(node, mv).is_none())
            .collect()
    }

    /// Children whose move appears in `legal`.
    #[must_use]
    pub fn legal_children(&self, node: NodeId, legal: &[M]) -> SmallVec<[NodeId; 8]> {
        self.get(node)
            .children
            .iter()
            .copied()
            .filter(|&c| self.get(c).mv.map_or(false, |mv| legal.contains(&mv)))
            .collect()
    }

    /// Children of the root.
    pub fn root_children(&self) -> impl Iterator<Item = &SearchNode<M>> {
        self.get(self.root).children.iter().map(|&c| self.get(c))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
            leaf_count: self.nodes.iter().filter(|n| n.is_leaf()).count(),
            root_visits: self.get(self.root).visits,
        }
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<M>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }
}

impl<M: Copy + Eq> Default for SearchTree<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a search tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth: u16,
    pub leaf_count: usize,
    pub root_visits: u32,
}

impl TreeStats {
    /// Average children per interior node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        let interior = self.node_count.saturating_sub(self.leaf_count);
        if interior == 0 {
            0.0
        } else {
            (self.node_count - 1) as f64 / interior as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_new() {
        let tree: SearchTree<u8> = SearchTree::new();
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::new(0));
        assert!(tree.get(tree.root()).is_root());
    }

    #[test]
    fn test_add_child_links_parent() {
        let mut tree = SearchTree::new();
        let root = tree.root();
        let a = tree.add_child(root, 10u8, PlayerId(0));
        let b = tree.add_child(a, 20u8, PlayerId(1));

        assert_eq!(tree.get(root).children.as_slice(), &[a]);
        assert_eq!(tree.get(b).parent, a);
        assert_eq!(tree.get(b).depth, 2);
        assert_eq!(tree.child_for(root, &10), Some(a));
        assert_eq!(tree.child_for(root, &20), None);
    }

    #[test]
    fn test_untried_and_legal_children() {
        let mut tree = SearchTree::new();
        let root = tree.root();
        let a = tree.add_child(root, 1u8, PlayerId(0));
        let _b = tree.add_child(root, 2u8, PlayerId(0));

        assert_eq!(tree.untried_moves(root, &[1, 3, 4]), vec![3, 4]);
        assert_eq!(tree.legal_children(root, &[1, 3]).as_slice(), &[a]);
        assert!(tree.untried_moves(root, &[1, 2]).is_empty());
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = SearchTree::new();
        let root = tree.root();
        let a = tree.add_child(root, 1u8, PlayerId(0));
        tree.add_child(root, 2u8, PlayerId(0));
        tree.add_child(a, 3u8, PlayerId(1));
        tree.get_mut(root).visits = 9;

        let stats = tree.stats();
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.leaf_count, 2);
        assert_eq!(stats.root_visits, 9);
        assert!((stats.branching_factor() - 1.5).abs() < 1e-12);
        assert_eq!(tree.root_children().count(), 2);
    }
}
