//! Graph data structures and operations.
//!
//! This module provides the node/edge records the physics kernel mutates,
//! the support sector holding curve control points, and the GraphEngine that
//! owns them, using petgraph's StableGraph for stable node/edge indices.

mod edge;
mod engine;
mod node;
mod support;

pub use edge::{Edge, EdgeId};
pub use engine::{GraphEngine, Sector};
pub use node::{Node, NodeId, NodeKey};
pub use support::{SupportId, SupportNode, SupportSector};
