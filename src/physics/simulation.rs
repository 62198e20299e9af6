//! Per-tick force orchestration.
//!
//! The typical tick looks like:
//! 1. **Pre-check** - a lone node gets a zero force and nothing else runs;
//!    too many nodes trigger the clusterer first.
//! 2. **Calculation set** - graph nodes, plus live support nodes when edges
//!    are drawn as smooth curves.
//! 3. **Gravity** - resets every force in the set.
//! 4. **Repulsion** - the configured solver adds its share.
//! 5. **Springs** - straight or curved, never both.
//!
//! Forces are only meaningful once `run_tick` returns `Ok`. A failed tick
//! leaves partial forces behind that must not be integrated.

use tracing::{debug, trace, warn};

use crate::graph::{GraphEngine, NodeId};

use super::accumulator::ForceAccumulator;
use super::calculation_set::CalculationSet;
use super::clustering::{Clusterer, NoClustering};
use super::config::{PhysicsConfig, SolverKind};
use super::error::PhysicsResult;
use super::gravity::GravityField;
use super::repulsion::{DirectRepulsion, NoRepulsion, RepulsionSolver};
use super::spring::{CurvedEdgeSpringSolver, SpringSolver};

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The graph had no nodes; nothing was computed.
    Empty,
    /// Only one node was active; its force was zeroed.
    SingleNode(NodeId),
    /// The full force pass ran.
    Computed {
        /// Graph nodes in the calculation set.
        nodes: usize,
        /// Support nodes in the calculation set.
        support_nodes: usize,
        /// Whether the clusterer ran first.
        clustered: bool,
    },
}

/// Runs the force pass once per frame.
///
/// The repulsion solver and clusterer are fixed when the simulation is
/// built.
pub struct ForceSimulation<R = NoRepulsion, C = NoClustering> {
    config: PhysicsConfig,
    repulsion: R,
    clusterer: C,
}

impl ForceSimulation<NoRepulsion, NoClustering> {
    /// A simulation with no repulsion and no clustering.
    pub fn without_repulsion(config: PhysicsConfig) -> Self {
        Self::new(config, NoRepulsion, NoClustering)
    }
}

impl ForceSimulation<DirectRepulsion, NoClustering> {
    /// A simulation using the built-in direct repulsion solver.
    pub fn with_direct_repulsion(mut config: PhysicsConfig) -> Self {
        config.solver = SolverKind::Repulsion;
        let repulsion = DirectRepulsion::from_config(&config.repulsion);
        Self::new(config, repulsion, NoClustering)
    }
}

impl<R: RepulsionSolver, C: Clusterer> ForceSimulation<R, C> {
    /// Build a simulation from its parts.
    pub fn new(config: PhysicsConfig, repulsion: R, clusterer: C) -> Self {
        debug!(solver = %config.solver, smooth_curves = config.smooth_curves, "force simulation configured");
        Self {
            config,
            repulsion,
            clusterer,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Switch between straight and curved springs for later ticks.
    pub fn set_smooth_curves(&mut self, smooth_curves: bool) {
        self.config.smooth_curves = smooth_curves;
    }

    /// The repulsion solver.
    pub fn repulsion(&self) -> &R {
        &self.repulsion
    }

    /// The clusterer.
    pub fn clusterer(&self) -> &C {
        &self.clusterer
    }

    /// Compute the net force on every active node.
    ///
    /// Collaborator failures abort the tick and are returned as is.
    pub fn run_tick(&mut self, graph: &mut GraphEngine) -> PhysicsResult<TickOutcome> {
        if graph.node_count() == 0 {
            return Ok(TickOutcome::Empty);
        }
        if let [only] = graph.node_ids() {
            let only = *only;
            if let Some(node) = graph.node_mut(only.into()) {
                node.set_force(0.0, 0.0);
            }
            trace!(node = %only, "single node, skipping force pass");
            return Ok(TickOutcome::SingleNode(only));
        }

        let clustered = self.cluster_if_crowded(graph)?;
        let set = self.compute_forces(graph)?;

        Ok(TickOutcome::Computed {
            nodes: set.len() - set.support_count(),
            support_nodes: set.support_count(),
            clustered,
        })
    }

    fn cluster_if_crowded(&mut self, graph: &mut GraphEngine) -> PhysicsResult<bool> {
        let clustering = &self.config.clustering;
        let active = graph.node_count();
        if !clustering.enabled || active <= clustering.cluster_threshold {
            return Ok(false);
        }

        debug!(
            active,
            threshold = clustering.cluster_threshold,
            target = clustering.reduce_to_nodes,
            "too many nodes, clustering without repositioning"
        );
        self.clusterer
            .cluster_to_fit(graph, clustering.reduce_to_nodes, false)
            .inspect_err(|err| warn!(%err, "clustering aborted the tick"))?;
        Ok(true)
    }

    fn compute_forces(&mut self, graph: &mut GraphEngine) -> PhysicsResult<CalculationSet> {
        let smooth = self.config.smooth_curves;
        if smooth {
            let created = graph.ensure_support_nodes();
            if created > 0 {
                trace!(created, "spawned support nodes");
            }
        }

        let set = CalculationSet::build(graph, smooth);
        trace!(
            nodes = set.len(),
            support_nodes = set.support_count(),
            "computing forces"
        );

        GravityField::new(self.config.central_gravity).apply(graph, &set, &self.config.damping);

        self.repulsion
            .apply_repulsion(graph, &set)
            .inspect_err(|err| warn!(%err, "repulsion aborted the tick"))?;

        let spring_constant = self.config.spring_constant;
        let edge_growth = self.config.clustering.edge_growth;
        if smooth {
            CurvedEdgeSpringSolver::new(spring_constant, edge_growth).apply(graph);
        } else {
            SpringSolver::new(spring_constant, edge_growth).apply(graph);
        }

        Ok(set)
    }
}
