//! Edge springs.
//!
//! Edges are Hookean springs: `force = k * (rest - length)`, decomposed along
//! the line between the two nodes, equal and opposite on each end, with no
//! clamping. Rest lengths grow with the growth indicator of the endpoints so
//! that edges around collapsed clusters read longer.
//!
//! [`SpringSolver`] handles straight edges. [`CurvedEdgeSpringSolver`] splits
//! each edge into two half-springs through its support node.

use crate::graph::{Edge, GraphEngine, Node, NodeKey};

use super::accumulator::ForceAccumulator;

/// Rest length of a straight edge, widened by its endpoints' growth.
#[inline]
pub fn grown_rest_length(length: f32, from_growth: f32, to_growth: f32, edge_growth: f32) -> f32 {
    length + (to_growth + from_growth) * edge_growth
}

/// Spring force along (dx, dy) for the given rest length.
///
/// Returns the components to add to the node the displacement points to.
#[inline]
fn spring_components(dx: f32, dy: f32, rest_length: f32, spring_constant: f32) -> (f32, f32) {
    let length = (dx * dx + dy * dy).sqrt();
    let angle = dy.atan2(dx);
    let spring_force = spring_constant * (rest_length - length);
    (angle.cos() * spring_force, angle.sin() * spring_force)
}

/// Apply one spring between two nodes.
///
/// The force is added to `first` and its negation to `second`; nothing else
/// is touched.
pub fn apply_spring(first: &mut Node, second: &mut Node, rest_length: f32, spring_constant: f32) {
    let dx = first.x - second.x;
    let dy = first.y - second.y;
    let (fx, fy) = spring_components(dx, dy, rest_length, spring_constant);

    first.add_force(fx, fy);
    second.add_force(-fx, -fy);
}

/// Whether an edge takes part in this tick's spring pass.
///
/// Both endpoints must be in the node collection; an edge reaching into
/// another sector is skipped, not zeroed.
fn is_active(graph: &GraphEngine, edge: &Edge) -> bool {
    edge.connected && graph.contains_node(edge.from) && graph.contains_node(edge.to)
}

/// Springs along straight edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSolver {
    /// Hooke constant.
    pub spring_constant: f32,
    /// Extra rest length per unit of endpoint growth.
    pub edge_growth: f32,
}

impl SpringSolver {
    /// Create a solver.
    pub fn new(spring_constant: f32, edge_growth: f32) -> Self {
        Self {
            spring_constant,
            edge_growth,
        }
    }

    /// Add spring forces for every connected edge.
    pub fn apply(&self, graph: &mut GraphEngine) {
        let edges: Vec<Edge> = graph
            .edges()
            .filter(|(_, edge)| is_active(graph, edge))
            .map(|(_, edge)| edge.clone())
            .collect();

        for edge in edges {
            // self-loops carry no net force
            let Some((from, to)) = graph.node_pair_mut(edge.from.into(), edge.to.into()) else {
                continue;
            };

            let dx = to.x - from.x;
            let dy = to.y - from.y;
            let rest = grown_rest_length(
                edge.length,
                from.growth_indicator,
                to.growth_indicator,
                self.edge_growth,
            );
            let (fx, fy) = spring_components(dx, dy, rest, self.spring_constant);

            from.add_force(-fx, -fy);
            to.add_force(fx, fy);
        }
    }
}

/// Springs routed through support nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvedEdgeSpringSolver {
    /// Hooke constant.
    pub spring_constant: f32,
    /// Extra rest length per unit of endpoint growth.
    pub edge_growth: f32,
}

impl CurvedEdgeSpringSolver {
    /// Create a solver.
    pub fn new(spring_constant: f32, edge_growth: f32) -> Self {
        Self {
            spring_constant,
            edge_growth,
        }
    }

    /// Rest length of each half of a curved edge.
    ///
    /// The two halves together span the full grown length. Only the true
    /// endpoints contribute growth.
    pub fn half_rest_length(&self, length: f32, from_growth: f32, to_growth: f32) -> f32 {
        0.5 * grown_rest_length(length, from_growth, to_growth, self.edge_growth)
    }

    /// Add `to <-> via` and `via <-> from` springs for every curved edge.
    ///
    /// Connected edges without a live support node get no spring.
    pub fn apply(&self, graph: &mut GraphEngine) {
        let edges: Vec<Edge> = graph
            .edges()
            .filter(|(_, edge)| is_active(graph, edge))
            .filter(|(_, edge)| edge.via.is_some_and(|via| graph.support().contains(via)))
            .map(|(_, edge)| edge.clone())
            .collect();

        for edge in edges {
            let Some(via) = edge.via else {
                continue;
            };
            let (Some(to), Some(from)) = (graph.node(edge.to.into()), graph.node(edge.from.into()))
            else {
                continue;
            };
            let rest = self.half_rest_length(edge.length, from.growth_indicator, to.growth_indicator);

            self.half_spring(graph, edge.to.into(), via.into(), rest);
            self.half_spring(graph, via.into(), edge.from.into(), rest);
        }
    }

    fn half_spring(&self, graph: &mut GraphEngine, first: NodeKey, second: NodeKey, rest: f32) {
        if let Some((first, second)) = graph.node_pair_mut(first, second) {
            apply_spring(first, second, rest, self.spring_constant);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    const EPS: f32 = 1e-5;

    fn force(graph: &GraphEngine, key: NodeKey) -> (f32, f32) {
        graph.node(key).unwrap().force()
    }

    fn assert_close(actual: (f32, f32), expected: (f32, f32)) {
        assert!(
            (actual.0 - expected.0).abs() < EPS && (actual.1 - expected.1).abs() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_stretched_edge_pulls_together() {
        let mut graph = GraphEngine::new();
        let a = graph.add_node(0.0, 0.0);
        let b = graph.add_node(10.0, 0.0);
        graph.add_edge(a, b, 5.0);

        SpringSolver::new(0.1, 0.0).apply(&mut graph);

        assert_close(force(&graph, a.into()), (0.5, 0.0));
        assert_close(force(&graph, b.into()), (-0.5, 0.0));
    }

    #[test]
    fn test_compressed_edge_pushes_apart() {
        let mut graph = GraphEngine::new();
        let a = graph.add_node(0.0, 0.0);
        let b = graph.add_node(0.0, 2.0);
        graph.add_edge(a, b, 10.0);

        SpringSolver::new(0.5, 0.0).apply(&mut graph);

        assert_close(force(&graph, a.into()), (0.0, -4.0));
        assert_close(force(&graph, b.into()), (0.0, 4.0));
    }

    #[test]
    fn test_forces_are_symmetric() {
        let mut graph = GraphEngine::new();
        let a = graph.add_node(-3.0, 7.0);
        let b = graph.add_node(12.0, -1.5);
        graph.add_edge(a, b, 4.0);
        graph.set_growth_indicator(b, 3.0);

        SpringSolver::new(0.07, 2.0).apply(&mut graph);

        let (fa, fb) = (force(&graph, a.into()), force(&graph, b.into()));
        assert_eq!(fa.0, -fb.0);
        assert_eq!(fa.1, -fb.1);
    }

    #[test]
    fn test_growth_lengthens_rest_length() {
        assert!(grown_rest_length(10.0, 2.0, 1.0, 5.0) > grown_rest_length(10.0, 1.0, 1.0, 5.0));
        assert_eq!(grown_rest_length(10.0, 2.0, 1.0, 5.0), 25.0);
    }

    #[test]
    fn test_growth_changes_spring_force() {
        let mut plain = GraphEngine::new();
        let a = plain.add_node(0.0, 0.0);
        let b = plain.add_node(10.0, 0.0);
        plain.add_edge(a, b, 10.0);

        let mut grown = GraphEngine::new();
        let c = grown.add_node(0.0, 0.0);
        let d = grown.add_node(10.0, 0.0);
        grown.add_edge(c, d, 10.0);
        grown.set_growth_indicator(c, 1.0);

        let solver = SpringSolver::new(0.1, 5.0);
        solver.apply(&mut plain);
        solver.apply(&mut grown);

        // at rest without growth; pushed apart once rest length grows
        assert_close(force(&plain, a.into()), (0.0, 0.0));
        assert_close(force(&grown, c.into()), (-0.5, 0.0));
    }

    #[test]
    fn test_disconnected_edge_is_skipped() {
        let mut graph = GraphEngine::new();
        let a = graph.add_node(0.0, 0.0);
        let b = graph.add_node(10.0, 0.0);
        let edge = graph.add_edge(a, b, 5.0);
        graph.add_edge(a, NodeId(77), 5.0);
        graph.set_edge_connected(edge, false);

        SpringSolver::new(0.1, 0.0).apply(&mut graph);

        assert_eq!(force(&graph, a.into()), (0.0, 0.0));
        assert_eq!(force(&graph, b.into()), (0.0, 0.0));
    }

    #[test]
    fn test_self_loop_is_ignored() {
        let mut graph = GraphEngine::new();
        let a = graph.add_node(1.0, 1.0);
        graph.add_edge(a, a, 5.0);

        SpringSolver::new(0.1, 0.0).apply(&mut graph);
        assert_eq!(force(&graph, a.into()), (0.0, 0.0));
    }

    #[test]
    fn test_apply_spring_primitive() {
        let mut first = Node::new(10.0, 0.0);
        let mut second = Node::new(0.0, 0.0);

        apply_spring(&mut first, &mut second, 5.0, 0.1);

        assert_close(first.force(), (-0.5, 0.0));
        assert_close(second.force(), (0.5, 0.0));
    }

    #[test]
    fn test_half_rest_lengths_sum_to_full_length() {
        let solver = CurvedEdgeSpringSolver::new(0.1, 3.0);
        let half = solver.half_rest_length(40.0, 2.0, 5.0);
        assert_eq!(2.0 * half, grown_rest_length(40.0, 2.0, 5.0, 3.0));
    }

    #[test]
    fn test_curved_edge_at_rest_feels_nothing() {
        let mut graph = GraphEngine::new();
        let a = graph.add_node(0.0, 0.0);
        let b = graph.add_node(10.0, 0.0);
        let edge = graph.add_edge(a, b, 10.0);
        graph.ensure_support_nodes();
        let via = graph.edge(edge).and_then(|e| e.via).unwrap();

        CurvedEdgeSpringSolver::new(0.1, 0.0).apply(&mut graph);

        assert_close(force(&graph, a.into()), (0.0, 0.0));
        assert_close(force(&graph, b.into()), (0.0, 0.0));
        assert_close(force(&graph, via.into()), (0.0, 0.0));
    }

    #[test]
    fn test_curved_edge_half_springs() {
        let mut graph = GraphEngine::new();
        let a = graph.add_node(0.0, 0.0);
        let b = graph.add_node(20.0, 0.0);
        let edge = graph.add_edge(a, b, 10.0);
        graph.ensure_support_nodes();
        let via = graph.edge(edge).and_then(|e| e.via).unwrap();

        CurvedEdgeSpringSolver::new(0.1, 0.0).apply(&mut graph);

        // each half is 10 long with rest 5: 0.5 pull on each end
        assert_close(force(&graph, a.into()), (0.5, 0.0));
        assert_close(force(&graph, b.into()), (-0.5, 0.0));
        assert_close(force(&graph, via.into()), (0.0, 0.0));

        let total = [a.into(), b.into(), via.into()]
            .into_iter()
            .map(|key| force(&graph, key))
            .fold((0.0, 0.0), |acc, f| (acc.0 + f.0, acc.1 + f.1));
        assert_close(total, (0.0, 0.0));
    }

    #[test]
    fn test_curved_growth_uses_true_endpoints() {
        let mut graph = GraphEngine::new();
        let a = graph.add_node(0.0, 0.0);
        let b = graph.add_node(20.0, 0.0);
        let edge = graph.add_edge(a, b, 10.0);
        graph.ensure_support_nodes();
        graph.set_growth_indicator(a, 1.0);
        graph.set_growth_indicator(b, 1.0);
        let via = graph.edge(edge).and_then(|e| e.via).unwrap();

        // full grown length 10 + 2 * 5 = 20 matches the span
        CurvedEdgeSpringSolver::new(0.1, 5.0).apply(&mut graph);

        assert_close(force(&graph, a.into()), (0.0, 0.0));
        assert_close(force(&graph, via.into()), (0.0, 0.0));
    }

    #[test]
    fn test_curved_skips_edges_without_support() {
        let mut graph = GraphEngine::new();
        let a = graph.add_node(0.0, 0.0);
        let b = graph.add_node(20.0, 0.0);
        graph.add_edge(a, b, 10.0);

        CurvedEdgeSpringSolver::new(0.1, 0.0).apply(&mut graph);

        assert_eq!(force(&graph, a.into()), (0.0, 0.0));
    }
}
