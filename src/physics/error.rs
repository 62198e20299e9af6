//! Error type for the force kernel.

use thiserror::Error;

use super::config::SolverKind;

/// Errors that abort a simulation tick or reject a configuration.
#[derive(Error, Debug)]
pub enum PhysicsError {
    /// The repulsion solver could not finish its pass.
    #[error("{solver} repulsion failed: {reason}")]
    Repulsion {
        /// Which solver failed.
        solver: SolverKind,
        /// What went wrong.
        reason: String,
    },

    /// The clustering collaborator could not reduce the node count.
    #[error("clustering failed: {0}")]
    Clustering(String),

    /// A configuration document could not be parsed.
    #[error("invalid physics configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for force kernel operations
pub type PhysicsResult<T> = Result<T, PhysicsError>;
