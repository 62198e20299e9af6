//! Per-node force accumulation.
//!
//! Gravity overwrites, everything after it adds. Any type that can hold a
//! force vector and a damping coefficient can take part in a tick.

use crate::graph::Node;

use super::config::DampingConfig;

/// A 2D force sink with set/add semantics.
pub trait ForceAccumulator {
    /// Overwrite the force vector.
    fn set_force(&mut self, fx: f32, fy: f32);

    /// Add to the force vector.
    fn add_force(&mut self, dfx: f32, dfy: f32);

    /// The force accumulated so far.
    fn force(&self) -> (f32, f32);

    /// Recompute damping from the number of nodes active this tick.
    fn update_damping(&mut self, active_count: usize, config: &DampingConfig);
}

impl ForceAccumulator for Node {
    #[inline]
    fn set_force(&mut self, fx: f32, fy: f32) {
        self.fx = fx;
        self.fy = fy;
    }

    #[inline]
    fn add_force(&mut self, dfx: f32, dfy: f32) {
        self.fx += dfx;
        self.fy += dfy;
    }

    #[inline]
    fn force(&self) -> (f32, f32) {
        (self.fx, self.fy)
    }

    #[inline]
    fn update_damping(&mut self, active_count: usize, config: &DampingConfig) {
        self.damping = config.coefficient(active_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let mut node = Node::new(0.0, 0.0);
        node.set_force(1.0, 2.0);
        node.set_force(-3.0, 0.5);
        assert_eq!(node.force(), (-3.0, 0.5));
    }

    #[test]
    fn test_add_accumulates() {
        let mut node = Node::new(0.0, 0.0);
        node.set_force(1.0, 1.0);
        node.add_force(0.5, -2.0);
        node.add_force(0.5, 0.0);
        assert_eq!(node.force(), (2.0, -1.0));
    }

    #[test]
    fn test_update_damping() {
        let config = DampingConfig {
            base: 0.1,
            per_node: 0.01,
            max: 0.5,
        };
        let mut node = Node::new(0.0, 0.0);

        node.update_damping(10, &config);
        assert!((node.damping - 0.2).abs() < 1e-6);

        node.update_damping(1000, &config);
        assert_eq!(node.damping, 0.5);
    }
}
