//! Node-node repulsion.
//!
//! Repulsion is pluggable. A solver is chosen once, when the simulation is
//! built, and runs between the gravity pass and the spring pass. Solvers only
//! ever add to a node's force; gravity has already reset it.
//!
//! Barnes-Hut and hierarchical solvers live outside this crate and plug in
//! through [`RepulsionSolver`]. Two solvers ship here: [`NoRepulsion`] and the
//! direct, distance-limited [`DirectRepulsion`].

use tracing::trace;

use crate::graph::GraphEngine;
use crate::spatial::SpatialIndex;

use super::accumulator::ForceAccumulator;
use super::calculation_set::CalculationSet;
use super::config::{RepulsionConfig, SolverKind};
use super::error::{PhysicsError, PhysicsResult};

/// Adds repulsion to every node of a calculation set.
pub trait RepulsionSolver {
    /// Add a repulsion force to each node of `set`. Must never reset forces.
    fn apply_repulsion(&mut self, graph: &mut GraphEngine, set: &CalculationSet) -> PhysicsResult<()>;
}

/// A solver that adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRepulsion;

impl RepulsionSolver for NoRepulsion {
    fn apply_repulsion(&mut self, _graph: &mut GraphEngine, _set: &CalculationSet) -> PhysicsResult<()> {
        Ok(())
    }
}

/// Pairwise repulsion limited to `2 * node_distance`.
///
/// Below half the node distance the push has unit strength; from there it
/// falls off linearly, reaching zero at twice the node distance.
pub struct DirectRepulsion {
    node_distance: f32,
    index: SpatialIndex,
    points: Vec<(usize, f32, f32)>,
    deltas: Vec<(f32, f32)>,
}

impl DirectRepulsion {
    /// Create a solver with the given node distance.
    pub fn new(node_distance: f32) -> Self {
        Self {
            node_distance,
            index: SpatialIndex::new(),
            points: Vec::new(),
            deltas: Vec::new(),
        }
    }

    /// Create a solver from configuration.
    pub fn from_config(config: &RepulsionConfig) -> Self {
        Self::new(config.node_distance)
    }

    /// Distance beyond which nodes do not interact.
    pub fn cutoff(&self) -> f32 {
        2.0 * self.node_distance
    }

    /// Strength of the push between two nodes `distance` apart, per unit of
    /// displacement.
    pub fn strength(&self, distance: f32) -> f32 {
        if distance >= self.cutoff() || distance <= 0.0 {
            return 0.0;
        }
        let magnitude = if distance < 0.5 * self.node_distance {
            1.0
        } else {
            (-2.0 / 3.0) / self.node_distance * distance + 4.0 / 3.0
        };
        magnitude / distance
    }
}

impl RepulsionSolver for DirectRepulsion {
    fn apply_repulsion(&mut self, graph: &mut GraphEngine, set: &CalculationSet) -> PhysicsResult<()> {
        self.points.clear();
        for (slot, &key) in set.keys().iter().enumerate() {
            let Some(node) = graph.node(key) else {
                continue;
            };
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(PhysicsError::Repulsion {
                    solver: SolverKind::Repulsion,
                    reason: format!("{key} has a non-finite position"),
                });
            }
            self.points.push((slot, node.x, node.y));
        }

        self.index.rebuild(&self.points);
        self.deltas.clear();
        self.deltas.resize(set.len(), (0.0, 0.0));

        let cutoff = self.cutoff();
        let mut pairs = 0usize;
        for &(i, xi, yi) in &self.points {
            for j in self.index.in_radius(xi, yi, cutoff) {
                // each unordered pair once
                if j <= i {
                    continue;
                }
                let Some(other) = graph.node(set.keys()[j]) else {
                    continue;
                };
                let dx = other.x - xi;
                let dy = other.y - yi;
                let strength = self.strength((dx * dx + dy * dy).sqrt());
                if strength == 0.0 {
                    continue;
                }

                let (fx, fy) = (dx * strength, dy * strength);
                self.deltas[i].0 -= fx;
                self.deltas[i].1 -= fy;
                self.deltas[j].0 += fx;
                self.deltas[j].1 += fy;
                pairs += 1;
            }
        }
        trace!(nodes = set.len(), pairs, "applied direct repulsion");

        for (&key, &(fx, fy)) in set.keys().iter().zip(&self.deltas) {
            if let Some(node) = graph.node_mut(key) {
                node.add_force(fx, fy);
            }
        }
        Ok(())
    }
}
