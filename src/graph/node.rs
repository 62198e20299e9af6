//! Node type and related structures.
//!
//! Nodes are the point masses of the layout. Each node has:
//! - A stable unique identifier (survives graph mutations)
//! - Position (x, y) in graph space
//! - The force accumulated during the current tick (fx, fy)
//! - A damping coefficient consumed by the integrator
//! - A growth indicator (how many collapsed nodes a cluster node stands for)

use std::fmt;

use super::support::SupportId;

/// Stable node identifier.
///
/// This ID remains valid even after other nodes are removed from the graph.
/// It wraps a u32 for efficient storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
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

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Key of anything that can take part in a force calculation.
///
/// Regular nodes live in the graph; support nodes live in the support
/// sector and have no identity in the main graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// A node of the main graph.
    Node(NodeId),
    /// A synthetic curve control point.
    Support(SupportId),
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Node(id) => id.fmt(f),
            NodeKey::Support(id) => id.fmt(f),
        }
    }
}

impl From<NodeId> for NodeKey {
    #[inline]
    fn from(id: NodeId) -> Self {
        NodeKey::Node(id)
    }
}

impl From<SupportId> for NodeKey {
    #[inline]
    fn from(id: SupportId) -> Self {
        NodeKey::Support(id)
    }
}

/// Physical state of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// X position in graph space.
    pub x: f32,
    /// Y position in graph space.
    pub y: f32,
    /// X component of the force accumulated this tick.
    pub fx: f32,
    /// Y component of the force accumulated this tick.
    pub fy: f32,
    /// Damping coefficient, recomputed from the active node count.
    pub damping: f32,
    /// Number of collapsed nodes this node represents (0 for plain nodes).
    pub growth_indicator: f32,
}

impl Node {
    /// Create a node at rest at the given position.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            fx: 0.0,
            fy: 0.0,
            damping: 0.0,
            growth_indicator: 0.0,
        }
    }

    /// Current position as a tuple.
    #[inline]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.0, 42);
        assert_eq!(format!("{}", id), "Node(42)");
    }

    #[test]
    fn test_node_id_conversion() {
        let id: NodeId = 123.into();
        let raw: u32 = id.into();
        assert_eq!(raw, 123);
    }

    #[test]
    fn test_node_key_display() {
        let key: NodeKey = NodeId(7).into();
        assert_eq!(key.to_string(), "Node(7)");

        let key: NodeKey = SupportId(3).into();
        assert_eq!(key.to_string(), "Support(3)");
    }

    #[test]
    fn test_new_node_at_rest() {
        let node = Node::new(3.0, 4.0);
        assert_eq!(node.position(), (3.0, 4.0));
        assert_eq!((node.fx, node.fy), (0.0, 0.0));
        assert_eq!(node.growth_indicator, 0.0);
    }
}
