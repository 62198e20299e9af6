//! Support sector: synthetic control points for smooth-curve edges.
//!
//! A support node exists for as long as its parent edge exists. Liveness is
//! never cached; readers check the parent edge against the edge mapping.

use std::collections::BTreeMap;
use std::fmt;

use super::edge::EdgeId;
use super::node::Node;

/// Identifier of a support node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SupportId(pub u32);

impl SupportId {
    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SupportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Support({})", self.0)
    }
}

/// A curve control point and the edge that spawned it.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportNode {
    /// The edge this node belongs to.
    pub parent_edge: EdgeId,
    /// Physical state. The growth indicator stays at zero.
    pub node: Node,
}

/// Pool of support nodes, ordered by id.
#[derive(Debug, Default)]
pub struct SupportSector {
    nodes: BTreeMap<SupportId, SupportNode>,
    next_id: u32,
}

impl SupportSector {
    /// Create an empty sector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a support node for `parent_edge` at (x, y).
    pub fn spawn(&mut self, parent_edge: EdgeId, x: f32, y: f32) -> SupportId {
        let id = SupportId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            SupportNode {
                parent_edge,
                node: Node::new(x, y),
            },
        );
        id
    }

    /// Look up a support node.
    pub fn get(&self, id: SupportId) -> Option<&SupportNode> {
        self.nodes.get(&id)
    }

    /// Look up a support node mutably.
    pub fn get_mut(&mut self, id: SupportId) -> Option<&mut SupportNode> {
        self.nodes.get_mut(&id)
    }

    /// Whether the pool holds `id`, live or stale.
    pub fn contains(&self, id: SupportId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterate all support nodes in id order, including stale ones.
    pub fn iter(&self) -> impl Iterator<Item = (SupportId, &SupportNode)> {
        self.nodes.iter().map(|(&id, node)| (id, node))
    }

    /// Number of support nodes in the pool, including stale ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every support node for which `is_live` returns false.
    ///
    /// Returns the number of nodes removed.
    pub fn retain_live(&mut self, mut is_live: impl FnMut(EdgeId) -> bool) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, support| is_live(support.parent_edge));
        before - self.nodes.len()
    }

    /// Remove everything and restart id assignment.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.next_id = 0;
    }
}
