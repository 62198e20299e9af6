//! Graph Physics - WASM Module
//!
//! This module computes, once per frame, the net force acting on every node
//! of a force-directed graph layout. It is compiled to WebAssembly and
//! exposes a JavaScript-friendly API via wasm-bindgen; the JS side owns the
//! integrator and the canvas.
//!
//! # Architecture
//!
//! - `graph`: Node/edge records and the support sector, owned by GraphEngine
//! - `physics`: Gravity, springs, pluggable repulsion and tick orchestration
//! - `spatial`: R-tree neighbour index for the built-in repulsion solver

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod graph;
pub mod physics;
pub mod spatial;

use graph::{EdgeId, GraphEngine, NodeId, Sector, SupportId};
use physics::{DirectRepulsion, ForceSimulation, PhysicsConfig};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for the force kernel.
///
/// This struct wraps a GraphEngine and a ForceSimulation and provides the
/// public API exposed to JavaScript.
#[wasm_bindgen]
pub struct GraphPhysicsWasm {
    graph: GraphEngine,
    simulation: ForceSimulation<DirectRepulsion>,
    /// [fx0, fy0, fx1, fy1, ...] in node order, refreshed after each tick
    forces: Vec<f32>,
    /// Damping per node in node order, refreshed after each tick
    damping: Vec<f32>,
}

#[wasm_bindgen]
impl GraphPhysicsWasm {
    /// Create a kernel from a plain JS configuration object.
    ///
    /// `undefined` or `null` selects the defaults; missing fields take their
    /// defaults too.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GraphPhysicsWasm, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            PhysicsConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self::with_config(config))
    }

    /// Create a kernel from a JSON configuration document.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<GraphPhysicsWasm, JsError> {
        Ok(Self::with_config(PhysicsConfig::from_json(json)?))
    }

    /// The active configuration as a JSON document.
    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> Result<String, JsError> {
        Ok(self.simulation.config().to_json()?)
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a node at the specified position.
    ///
    /// Returns the stable node ID.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, x: f32, y: f32) -> u32 {
        self.graph.add_node(x, y).0
    }

    /// Add a node under a caller-chosen ID.
    ///
    /// Returns false if the ID is taken.
    #[wasm_bindgen(js_name = addNodeWithId)]
    pub fn add_node_with_id(&mut self, node_id: u32, x: f32, y: f32) -> bool {
        self.graph.add_node_with_id(NodeId(node_id), x, y)
    }

    /// Remove a node by ID. Its edges become disconnected.
    ///
    /// Returns true if the node existed and was removed.
    #[wasm_bindgen(js_name = removeNode)]
    pub fn remove_node(&mut self, node_id: u32) -> bool {
        self.graph.remove_node(NodeId(node_id))
    }

    /// Get the number of nodes in the graph.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.graph.node_count() as u32
    }

    /// Node IDs in the order used by the force and damping buffers.
    #[wasm_bindgen(js_name = getNodeIds)]
    pub fn get_node_ids(&self) -> Vec<u32> {
        self.graph.node_ids().iter().map(|id| id.0).collect()
    }

    /// Get a node's X position.
    #[wasm_bindgen(js_name = getNodeX)]
    pub fn get_node_x(&self, node_id: u32) -> Option<f32> {
        self.graph.node_position(NodeId(node_id)).map(|(x, _)| x)
    }

    /// Get a node's Y position.
    #[wasm_bindgen(js_name = getNodeY)]
    pub fn get_node_y(&self, node_id: u32) -> Option<f32> {
        self.graph.node_position(NodeId(node_id)).map(|(_, y)| y)
    }

    /// Set a node's position (written back by the integrator).
    #[wasm_bindgen(js_name = setNodePosition)]
    pub fn set_node_position(&mut self, node_id: u32, x: f32, y: f32) -> bool {
        self.graph.set_node_position(NodeId(node_id), x, y)
    }

    /// Set how many collapsed nodes a node stands for.
    #[wasm_bindgen(js_name = setGrowthIndicator)]
    pub fn set_growth_indicator(&mut self, node_id: u32, growth: f32) -> bool {
        self.graph.set_growth_indicator(NodeId(node_id), growth)
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Add an edge with a nominal spring length.
    ///
    /// The edge stays disconnected until both endpoints exist.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, from: u32, to: u32, length: f32) -> u32 {
        self.graph.add_edge(NodeId(from), NodeId(to), length).0
    }

    /// Remove an edge by ID.
    ///
    /// Returns true if the edge existed and was removed.
    #[wasm_bindgen(js_name = removeEdge)]
    pub fn remove_edge(&mut self, edge_id: u32) -> bool {
        self.graph.remove_edge(EdgeId(edge_id))
    }

    /// Connect or disconnect an edge.
    ///
    /// Returns the resulting state, or undefined for an unknown edge.
    #[wasm_bindgen(js_name = setEdgeConnected)]
    pub fn set_edge_connected(&mut self, edge_id: u32, connected: bool) -> Option<bool> {
        self.graph.set_edge_connected(EdgeId(edge_id), connected)
    }

    /// Change an edge's nominal spring length.
    #[wasm_bindgen(js_name = setEdgeLength)]
    pub fn set_edge_length(&mut self, edge_id: u32, length: f32) -> bool {
        self.graph.set_edge_length(EdgeId(edge_id), length)
    }

    /// Get the number of edges, connected or not.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.graph.edge_count() as u32
    }

    /// Get neighbors of a node over connected edges.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, node_id: u32) -> Vec<u32> {
        self.graph
            .neighbors(NodeId(node_id))
            .into_iter()
            .map(|id| id.0)
            .collect()
    }

    // =========================================================================
    // Smooth Curves
    // =========================================================================

    /// Switch smooth-curve springs on or off for later ticks.
    #[wasm_bindgen(js_name = setSmoothCurves)]
    pub fn set_smooth_curves(&mut self, smooth_curves: bool) {
        self.simulation.set_smooth_curves(smooth_curves);
    }

    /// Support node of an edge, if one has been created.
    #[wasm_bindgen(js_name = getSupportNode)]
    pub fn get_support_node(&self, edge_id: u32) -> Option<u32> {
        self.graph
            .edge(EdgeId(edge_id))
            .and_then(|edge| edge.via)
            .map(|id| id.raw())
    }

    /// Get a support node's position as [x, y].
    #[wasm_bindgen(js_name = getSupportPosition)]
    pub fn get_support_position(&self, support_id: u32) -> Option<Vec<f32>> {
        self.graph
            .node(SupportId(support_id).into())
            .map(|node| vec![node.x, node.y])
    }

    /// Set a support node's position (written back by the integrator).
    #[wasm_bindgen(js_name = setSupportPosition)]
    pub fn set_support_position(&mut self, support_id: u32, x: f32, y: f32) -> bool {
        self.graph.set_position(SupportId(support_id).into(), x, y)
    }

    /// Get a support node's force as [fx, fy].
    #[wasm_bindgen(js_name = getSupportForce)]
    pub fn get_support_force(&self, support_id: u32) -> Option<Vec<f32>> {
        self.graph
            .node(SupportId(support_id).into())
            .map(|node| vec![node.fx, node.fy])
    }

    /// Drop support nodes whose edge was removed.
    ///
    /// Returns the number of support nodes deleted.
    #[wasm_bindgen(js_name = pruneSupportNodes)]
    pub fn prune_support_nodes(&mut self) -> u32 {
        self.graph.prune_support_nodes() as u32
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Mark whether the loaded nodes come from a clustering pocket.
    ///
    /// Pocket nodes feel no central gravity.
    #[wasm_bindgen(js_name = setPocketSector)]
    pub fn set_pocket_sector(&mut self, pocket: bool) {
        let sector = if pocket { Sector::Pocket } else { Sector::Default };
        self.graph.set_active_sector(sector);
    }

    /// Compute forces for one frame.
    ///
    /// On error the force buffers keep the previous frame's values.
    pub fn tick(&mut self) -> Result<(), JsError> {
        self.simulation.run_tick(&mut self.graph)?;
        self.refresh_buffers();
        Ok(())
    }

    /// Forces from the last successful tick as [fx0, fy0, fx1, fy1, ...].
    #[wasm_bindgen(js_name = getForces)]
    pub fn get_forces(&self) -> Vec<f32> {
        self.forces.clone()
    }

    /// Get a zero-copy view of the force buffer.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately, do not store.
    #[wasm_bindgen(js_name = getForcesView)]
    pub fn get_forces_view(&self) -> Float32Array {
        unsafe { Float32Array::view(&self.forces) }
    }

    /// Damping per node from the last successful tick.
    #[wasm_bindgen(js_name = getDamping)]
    pub fn get_damping(&self) -> Vec<f32> {
        self.damping.clone()
    }

    /// Clear all nodes, edges and buffers.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.forces.clear();
        self.damping.clear();
    }
}

impl GraphPhysicsWasm {
    fn with_config(config: PhysicsConfig) -> Self {
        Self {
            graph: GraphEngine::new(),
            simulation: ForceSimulation::with_direct_repulsion(config),
            forces: Vec::new(),
            damping: Vec::new(),
        }
    }

    fn refresh_buffers(&mut self) {
        self.forces.clear();
        self.damping.clear();
        for &id in self.graph.node_ids() {
            if let Some(node) = self.graph.node(id.into()) {
                self.forces.push(node.fx);
                self.forces.push(node.fy);
                self.damping.push(node.damping);
            }
        }
    }
}
