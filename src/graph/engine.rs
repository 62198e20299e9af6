//! GraphEngine - owner of every node and edge the physics kernel touches.
//!
//! The GraphEngine stores the graph topology using petgraph's StableGraph,
//! with the physical node records as node weights. Edges are recorded in an
//! ordered map so that edges whose endpoints are missing can survive until
//! the endpoint returns; only connected edges are mirrored into the
//! StableGraph.

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use std::collections::{BTreeMap, HashMap};

use super::edge::{Edge, EdgeId};
use super::node::{Node, NodeId, NodeKey};
use super::support::{SupportId, SupportSector};

/// Partition of the node space the graph currently draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sector {
    /// The top-level sector.
    #[default]
    Default,
    /// An isolated side region opened by clustering.
    Pocket,
}

/// The core graph engine.
///
/// This struct manages:
/// - Graph topology via petgraph
/// - Physical node records (position, force, damping, growth)
/// - Edge records, connected or not
/// - The support sector used for smooth curves
/// - ID mapping between stable IDs and internal indices
pub struct GraphEngine {
    /// The underlying graph structure.
    /// Nodes store their physical record, edges store their stable EdgeId.
    graph: StableGraph<Node, EdgeId, Directed>,

    /// Map from stable NodeId to petgraph NodeIndex
    node_id_to_index: HashMap<NodeId, NodeIndex>,

    /// Reverse map from petgraph NodeIndex to stable NodeId
    node_index_to_id: HashMap<NodeIndex, NodeId>,

    /// Node ids in insertion order
    node_order: Vec<NodeId>,

    /// All edge records, connected or not
    edges: BTreeMap<EdgeId, Edge>,

    /// Map from stable EdgeId to petgraph EdgeIndex (connected edges only)
    edge_id_to_index: HashMap<EdgeId, EdgeIndex>,

    /// Next node ID to assign
    next_node_id: u32,

    /// Next edge ID to assign
    next_edge_id: u32,

    /// Curve control points
    support: SupportSector,

    /// Sector the node collection is currently drawn from
    active_sector: Sector,
}

impl GraphEngine {
    /// Create a new empty graph engine.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_id_to_index: HashMap::new(),
            node_index_to_id: HashMap::new(),
            node_order: Vec::new(),
            edges: BTreeMap::new(),
            edge_id_to_index: HashMap::new(),
            next_node_id: 0,
            next_edge_id: 0,
            support: SupportSector::new(),
            active_sector: Sector::Default,
        }
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a node at the specified position.
    ///
    /// IDs taken through `add_node_with_id` are skipped.
    pub fn add_node(&mut self, x: f32, y: f32) -> NodeId {
        let id = self.next_free_node_id();
        self.insert_node(id, x, y);
        id
    }

    fn next_free_node_id(&self) -> NodeId {
        let mut candidate = self.next_node_id;
        // the map can never hold every u32, so this terminates
        while self.node_id_to_index.contains_key(&NodeId(candidate)) {
            candidate = candidate.wrapping_add(1);
        }
        NodeId(candidate)
    }

    /// Add a node under a caller-chosen ID.
    ///
    /// Edges that were waiting for this ID are reconnected. Returns false if
    /// the ID is already in use.
    pub fn add_node_with_id(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        if self.node_id_to_index.contains_key(&id) {
            return false;
        }
        self.insert_node(id, x, y);

        let waiting: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|(_, edge)| !edge.connected && edge.touches(id))
            .map(|(&edge_id, _)| edge_id)
            .collect();
        for edge_id in waiting {
            self.connect_edge(edge_id);
        }
        true
    }

    fn insert_node(&mut self, id: NodeId, x: f32, y: f32) {
        self.next_node_id = self.next_node_id.max(id.0.saturating_add(1));

        let index = self.graph.add_node(Node::new(x, y));
        self.node_id_to_index.insert(id, index);
        self.node_index_to_id.insert(index, id);
        self.node_order.push(id);
    }

    /// Remove a node. Its edges stay recorded but become disconnected.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(index) = self.node_id_to_index.remove(&id) else {
            return false;
        };

        // petgraph drops the incident edges with the node
        let incident: Vec<EdgeId> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .chain(self.graph.edges_directed(index, Direction::Incoming))
            .map(|e| *e.weight())
            .collect();
        for edge_id in incident {
            self.edge_id_to_index.remove(&edge_id);
            if let Some(edge) = self.edges.get_mut(&edge_id) {
                edge.connected = false;
            }
        }

        self.node_index_to_id.remove(&index);
        self.node_order.retain(|&n| n != id);
        self.graph.remove_node(index);
        true
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_order
    }

    /// Whether the node collection holds `id`.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_id_to_index.contains_key(&id)
    }

    /// Get a node's position.
    pub fn node_position(&self, id: NodeId) -> Option<(f32, f32)> {
        self.node(id.into()).map(Node::position)
    }

    /// Set a node's position.
    pub fn set_node_position(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        self.set_position(id.into(), x, y)
    }

    /// Set the position of a node or support node.
    pub fn set_position(&mut self, key: NodeKey, x: f32, y: f32) -> bool {
        match self.node_mut(key) {
            Some(node) => {
                node.x = x;
                node.y = y;
                true
            }
            None => false,
        }
    }

    /// Set how many collapsed nodes `id` stands for.
    pub fn set_growth_indicator(&mut self, id: NodeId, growth: f32) -> bool {
        match self.node_mut(id.into()) {
            Some(node) => {
                node.growth_indicator = growth;
                true
            }
            None => false,
        }
    }

    /// Look up a node or support node.
    ///
    /// Support nodes are returned whether or not their parent edge is live.
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        match key {
            NodeKey::Node(id) => {
                let index = *self.node_id_to_index.get(&id)?;
                self.graph.node_weight(index)
            }
            NodeKey::Support(id) => self.support.get(id).map(|s| &s.node),
        }
    }

    /// Look up a node or support node mutably.
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        match key {
            NodeKey::Node(id) => {
                let index = *self.node_id_to_index.get(&id)?;
                self.graph.node_weight_mut(index)
            }
            NodeKey::Support(id) => self.support.get_mut(id).map(|s| &mut s.node),
        }
    }

    /// Borrow two distinct nodes mutably at once.
    ///
    /// Returns None if either key is missing or both keys name the same
    /// node. Support nodes never pair with each other.
    pub fn node_pair_mut(&mut self, a: NodeKey, b: NodeKey) -> Option<(&mut Node, &mut Node)> {
        match (a, b) {
            (NodeKey::Node(a), NodeKey::Node(b)) => {
                if a == b {
                    return None;
                }
                let ia = *self.node_id_to_index.get(&a)?;
                let ib = *self.node_id_to_index.get(&b)?;
                Some(self.graph.index_twice_mut(ia, ib))
            }
            (NodeKey::Node(a), NodeKey::Support(b)) => {
                let ia = *self.node_id_to_index.get(&a)?;
                let node = self.graph.node_weight_mut(ia)?;
                let support = self.support.get_mut(b)?;
                Some((node, &mut support.node))
            }
            (NodeKey::Support(a), NodeKey::Node(b)) => {
                let ib = *self.node_id_to_index.get(&b)?;
                let node = self.graph.node_weight_mut(ib)?;
                let support = self.support.get_mut(a)?;
                Some((&mut support.node, node))
            }
            (NodeKey::Support(_), NodeKey::Support(_)) => None,
        }
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Add an edge between two nodes.
    ///
    /// The edge is always recorded. It is connected only if both endpoints
    /// exist; otherwise it waits for them.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, length: f32) -> EdgeId {
        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;

        self.edges.insert(id, Edge::new(from, to, length));
        self.connect_edge(id);
        id
    }

    /// Remove an edge.
    ///
    /// Its support node, if any, is left in the pool; it is stale from now on.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        if self.edges.remove(&id).is_none() {
            return false;
        }
        if let Some(index) = self.edge_id_to_index.remove(&id) {
            self.graph.remove_edge(index);
        }
        true
    }

    /// Connect or disconnect an edge.
    ///
    /// Connecting only succeeds if both endpoints exist. Returns the
    /// resulting `connected` state, or None for an unknown edge.
    pub fn set_edge_connected(&mut self, id: EdgeId, connected: bool) -> Option<bool> {
        if !self.edges.contains_key(&id) {
            return None;
        }
        if connected {
            Some(self.connect_edge(id))
        } else {
            self.disconnect_edge(id);
            Some(false)
        }
    }

    /// Change an edge's nominal length.
    pub fn set_edge_length(&mut self, id: EdgeId, length: f32) -> bool {
        match self.edges.get_mut(&id) {
            Some(edge) => {
                edge.length = length;
                true
            }
            None => false,
        }
    }

    fn connect_edge(&mut self, id: EdgeId) -> bool {
        let Some(edge) = self.edges.get_mut(&id) else {
            return false;
        };
        if edge.connected {
            return true;
        }
        let (Some(&from), Some(&to)) = (
            self.node_id_to_index.get(&edge.from),
            self.node_id_to_index.get(&edge.to),
        ) else {
            return false;
        };

        let index = self.graph.add_edge(from, to, id);
        self.edge_id_to_index.insert(id, index);
        edge.connected = true;
        true
    }

    fn disconnect_edge(&mut self, id: EdgeId) {
        if let Some(index) = self.edge_id_to_index.remove(&id) {
            self.graph.remove_edge(index);
        }
        if let Some(edge) = self.edges.get_mut(&id) {
            edge.connected = false;
        }
    }

    /// Get the number of recorded edges, connected or not.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up an edge.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Iterate all edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().map(|(&id, edge)| (id, edge))
    }

    /// Get neighbors of a node over connected edges, in either direction.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.node_id_to_index
            .get(&id)
            .map(|&index| {
                self.graph
                    .neighbors_undirected(index)
                    .filter_map(|n| self.node_index_to_id.get(&n).copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of connected edges touching a node.
    pub fn degree(&self, id: NodeId) -> usize {
        self.node_id_to_index
            .get(&id)
            .map(|&index| {
                self.graph.edges_directed(index, Direction::Outgoing).count()
                    + self.graph.edges_directed(index, Direction::Incoming).count()
            })
            .unwrap_or(0)
    }

    // =========================================================================
    // Support Sector
    // =========================================================================

    /// The support node pool, stale entries included.
    pub fn support(&self) -> &SupportSector {
        &self.support
    }

    /// Give every connected edge a live support node.
    ///
    /// New support nodes are placed at the midpoint of their edge. Returns
    /// the number of support nodes created.
    pub fn ensure_support_nodes(&mut self) -> usize {
        let mut created = 0;
        for (&id, edge) in self.edges.iter_mut() {
            if !edge.connected || edge.via.is_some_and(|via| self.support.contains(via)) {
                continue;
            }
            let (Some(from), Some(to)) = (
                self.node_id_to_index
                    .get(&edge.from)
                    .and_then(|&i| self.graph.node_weight(i)),
                self.node_id_to_index
                    .get(&edge.to)
                    .and_then(|&i| self.graph.node_weight(i)),
            ) else {
                continue;
            };

            let x = 0.5 * (from.x + to.x);
            let y = 0.5 * (from.y + to.y);
            edge.via = Some(self.support.spawn(id, x, y));
            created += 1;
        }
        created
    }

    /// Whether a support node's parent edge exists and is connected.
    pub fn is_support_live(&self, id: SupportId) -> bool {
        self.support
            .get(id)
            .is_some_and(|s| self.edges.get(&s.parent_edge).is_some_and(|e| e.connected))
    }

    /// Delete support nodes whose parent edge is gone.
    ///
    /// Returns the number of support nodes removed.
    pub fn prune_support_nodes(&mut self) -> usize {
        let edges = &self.edges;
        self.support.retain_live(|parent| edges.contains_key(&parent))
    }

    // =========================================================================
    // Sectors
    // =========================================================================

    /// Sector the node collection is currently drawn from.
    pub fn active_sector(&self) -> Sector {
        self.active_sector
    }

    /// Switch the active sector.
    pub fn set_active_sector(&mut self, sector: Sector) {
        self.active_sector = sector;
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Clear all nodes, edges and support nodes.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.node_id_to_index.clear();
        self.node_index_to_id.clear();
        self.node_order.clear();
        self.edges.clear();
        self.edge_id_to_index.clear();
        self.next_node_id = 0;
        self.next_edge_id = 0;
        self.support.clear();
        self.active_sector = Sector::Default;
    }
}

impl Default for GraphEngine {
    fn default() -> Self {
        Self::new()
    }
}
