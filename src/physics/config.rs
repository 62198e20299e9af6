//! Physics configuration.
//!
//! All values are read-only to the kernel and trusted as given; range and
//! sign checks belong to whoever builds the configuration. Field names are
//! camelCase on the wire so the same document can come from JSON or from a
//! plain JS object.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::PhysicsResult;

/// Which repulsion solver a simulation was configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolverKind {
    /// Quadtree approximation.
    #[default]
    BarnesHut,
    /// Direct pairwise repulsion with a distance cut-off.
    Repulsion,
    /// Repulsion over a hierarchical layout.
    HierarchicalRepulsion,
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverKind::BarnesHut => "barnes-hut",
            SolverKind::Repulsion => "direct",
            SolverKind::HierarchicalRepulsion => "hierarchical",
        };
        f.write_str(name)
    }
}

/// Node-count driven clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusteringConfig {
    /// Whether the clustering safety valve may run (default: false).
    pub enabled: bool,
    /// Node count above which clustering is triggered (default: 500).
    pub cluster_threshold: usize,
    /// Target node count handed to the clusterer (default: 300).
    pub reduce_to_nodes: usize,
    /// Extra rest length per unit of endpoint growth (default: 20.0).
    pub edge_growth: f32,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cluster_threshold: 500,
            reduce_to_nodes: 300,
            edge_growth: 20.0,
        }
    }
}

/// Settings for the built-in direct repulsion solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepulsionConfig {
    /// Distance at which repulsion starts to fade (default: 100.0).
    /// Nothing is felt beyond twice this distance.
    pub node_distance: f32,
}

impl Default for RepulsionConfig {
    fn default() -> Self {
        Self {
            node_distance: 100.0,
        }
    }
}

/// How damping grows with the number of active nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DampingConfig {
    /// Damping with no active nodes (default: 0.09).
    pub base: f32,
    /// Increase per active node (default: 0.0002).
    pub per_node: f32,
    /// Upper bound (default: 0.3).
    pub max: f32,
}

impl Default for DampingConfig {
    fn default() -> Self {
        Self {
            base: 0.09,
            per_node: 0.0002,
            max: 0.3,
        }
    }
}

impl DampingConfig {
    /// Damping coefficient for a tick with `active_count` nodes.
    pub fn coefficient(&self, active_count: usize) -> f32 {
        (self.base + self.per_node * active_count as f32).min(self.max)
    }
}

/// Configuration for the force simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsConfig {
    /// Constant pull toward the origin (default: 0.3).
    pub central_gravity: f32,
    /// Hooke constant shared by all springs (default: 0.05).
    pub spring_constant: f32,
    /// Route springs through support nodes (default: false).
    pub smooth_curves: bool,
    /// Repulsion solver selection (default: Barnes-Hut).
    pub solver: SolverKind,
    /// Built-in repulsion settings.
    pub repulsion: RepulsionConfig,
    /// Clustering safety valve.
    pub clustering: ClusteringConfig,
    /// Damping schedule.
    pub damping: DampingConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            central_gravity: 0.3,
            spring_constant: 0.05,
            smooth_curves: false,
            solver: SolverKind::default(),
            repulsion: RepulsionConfig::default(),
            clustering: ClusteringConfig::default(),
            damping: DampingConfig::default(),
        }
    }
}

impl PhysicsConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> PhysicsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> PhysicsResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PhysicsError;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = PhysicsConfig::from_json("{}").unwrap();
        assert_eq!(config, PhysicsConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = PhysicsConfig::from_json(
            r#"{
                "centralGravity": 0.0,
                "smoothCurves": true,
                "solver": "hierarchicalRepulsion",
                "clustering": { "enabled": true, "clusterThreshold": 10 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.central_gravity, 0.0);
        assert!(config.smooth_curves);
        assert_eq!(config.solver, SolverKind::HierarchicalRepulsion);
        assert!(config.clustering.enabled);
        assert_eq!(config.clustering.cluster_threshold, 10);
        assert_eq!(config.clustering.reduce_to_nodes, 300);
        assert_eq!(config.spring_constant, 0.05);
    }

    #[test]
    fn test_malformed_document() {
        let err = PhysicsConfig::from_json(r#"{ "springConstant": "stiff" }"#).unwrap_err();
        assert!(matches!(err, PhysicsError::Config(_)));
    }

    #[test]
    fn test_json_round_trip_keeps_camel_case() {
        let json = PhysicsConfig::default().to_json().unwrap();
        assert!(json.contains("\"centralGravity\""));
        assert!(json.contains("\"reduceToNodes\""));
    }

    #[test]
    fn test_damping_grows_with_active_count() {
        let damping = DampingConfig::default();
        assert_eq!(damping.coefficient(0), 0.09);
        assert!(damping.coefficient(100) > damping.coefficient(10));
        assert_eq!(damping.coefficient(1_000_000), 0.3);
    }
}
