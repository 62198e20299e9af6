//! Force kernel for force-directed graph layout.
//!
//! Once per frame, [`ForceSimulation::run_tick`] computes the net force on
//! every active node: constant central gravity, pluggable node repulsion and
//! Hookean edge springs, optionally routed through curve support nodes. The
//! forces are read back by an integrator that lives outside this crate.
//!
//! # Architecture
//!
//! - `accumulator`: set/add semantics for per-node forces, damping refresh
//! - `calculation_set`: which nodes take part in a tick
//! - `gravity`: central pull, the reset point of each tick
//! - `repulsion`: solver contract plus the built-in solvers
//! - `spring`: straight and curved spring solvers
//! - `clustering`: the node-count safety valve contract
//! - `simulation`: tick orchestration

mod accumulator;
mod calculation_set;
mod clustering;
mod config;
mod error;
mod gravity;
mod repulsion;
mod simulation;
mod spring;

pub use accumulator::ForceAccumulator;
pub use calculation_set::CalculationSet;
pub use clustering::{Clusterer, NoClustering};
pub use config::{ClusteringConfig, DampingConfig, PhysicsConfig, RepulsionConfig, SolverKind};
pub use error::{PhysicsError, PhysicsResult};
pub use gravity::GravityField;
pub use repulsion::{DirectRepulsion, NoRepulsion, RepulsionSolver};
pub use simulation::{ForceSimulation, TickOutcome};
pub use spring::{CurvedEdgeSpringSolver, SpringSolver, apply_spring, grown_rest_length};
