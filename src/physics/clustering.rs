//! Clustering collaborator contract.
//!
//! Clustering is a performance safety valve: when too many nodes are active
//! the simulation asks a [`Clusterer`] to collapse some of them before any
//! force is computed. How nodes are chosen and merged is up to the clusterer.

use crate::graph::GraphEngine;

use super::error::PhysicsResult;

/// Reduces the number of active nodes.
pub trait Clusterer {
    /// Collapse nodes until at most `target` remain.
    ///
    /// With `reposition_after` false, nodes that survive keep their
    /// positions. Clusterers are expected to raise the growth indicator of
    /// the nodes that absorb others.
    fn cluster_to_fit(
        &mut self,
        graph: &mut GraphEngine,
        target: usize,
        reposition_after: bool,
    ) -> PhysicsResult<()>;
}

/// A clusterer that never collapses anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClustering;

impl Clusterer for NoClustering {
    fn cluster_to_fit(
        &mut self,
        _graph: &mut GraphEngine,
        _target: usize,
        _reposition_after: bool,
    ) -> PhysicsResult<()> {
        Ok(())
    }
}
