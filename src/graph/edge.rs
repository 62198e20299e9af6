//! Edge type and related structures.
//!
//! Edges are the springs of the layout. Each edge has:
//! - A stable unique identifier
//! - `from` and `to` node IDs (edges never own their endpoints)
//! - A nominal rest length
//! - A `connected` flag, true iff both endpoints currently exist
//! - An optional `via` support node when drawn as a smooth curve

use std::fmt;

use super::node::NodeId;
use super::support::SupportId;

/// Stable edge identifier.
///
/// This ID remains valid even after other edges are removed from the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Create a new EdgeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

impl From<u32> for EdgeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<EdgeId> for u32 {
    #[inline]
    fn from(id: EdgeId) -> Self {
        id.0
    }
}

/// An edge record.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Source endpoint.
    pub from: NodeId,
    /// Target endpoint.
    pub to: NodeId,
    /// Nominal spring length.
    pub length: f32,
    /// Whether both endpoints are currently present.
    pub connected: bool,
    /// Control point of the curve, if one has been synthesized.
    pub via: Option<SupportId>,
}

impl Edge {
    /// Create a disconnected edge with no support node.
    pub fn new(from: NodeId, to: NodeId, length: f32) -> Self {
        Self {
            from,
            to,
            length,
            connected: false,
            via: None,
        }
    }

    /// Whether the edge touches `node`.
    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_id() {
        let id = EdgeId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Edge(42)");
    }

    #[test]
    fn test_new_edge_starts_detached() {
        let edge = Edge::new(NodeId(1), NodeId(2), 50.0);
        assert!(!edge.connected);
        assert!(edge.via.is_none());
        assert!(edge.touches(NodeId(1)));
        assert!(edge.touches(NodeId(2)));
        assert!(!edge.touches(NodeId(3)));
    }
}
