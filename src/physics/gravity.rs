//! Central gravity.
//!
//! Every node in the calculation set is pulled toward the origin with the
//! same magnitude, whatever its distance. Nodes drawn from a pocket sector
//! feel nothing. Either way the node's force is overwritten, which makes
//! this pass the reset point of every tick.

use tracing::trace;

use crate::graph::{GraphEngine, Sector};

use super::accumulator::ForceAccumulator;
use super::calculation_set::CalculationSet;
use super::config::DampingConfig;

/// Constant-magnitude pull toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    /// Magnitude of the pull.
    pub central_gravity: f32,
}

impl GravityField {
    /// Create a field with the given magnitude.
    pub fn new(central_gravity: f32) -> Self {
        Self { central_gravity }
    }

    /// Force felt by a node at (x, y).
    pub fn force_at(&self, x: f32, y: f32, sector: Sector) -> (f32, f32) {
        match sector {
            Sector::Default => {
                let angle = (-y).atan2(-x);
                (
                    angle.cos() * self.central_gravity,
                    angle.sin() * self.central_gravity,
                )
            }
            Sector::Pocket => (0.0, 0.0),
        }
    }

    /// Reset every node in `set` to its gravity force and refresh damping.
    pub fn apply(&self, graph: &mut GraphEngine, set: &CalculationSet, damping: &DampingConfig) {
        let sector = graph.active_sector();
        let active = set.len();
        trace!(nodes = active, ?sector, "applying central gravity");

        for &key in set.keys() {
            if let Some(node) = graph.node_mut(key) {
                let (fx, fy) = self.force_at(node.x, node.y, sector);
                node.set_force(fx, fy);
                node.update_damping(active, damping);
            }
        }
    }
}
