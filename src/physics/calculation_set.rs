//! Selection of the nodes that take part in a tick.
//!
//! Without smooth curves the set is the node collection itself. With smooth
//! curves it also holds every support node whose parent edge is connected;
//! support nodes left behind by removed edges are skipped here, every tick,
//! rather than deleted.

use crate::graph::{GraphEngine, NodeKey};

/// Ordered keys of the nodes used for the current tick.
///
/// Rebuilt every tick and never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationSet {
    keys: Vec<NodeKey>,
    support_count: usize,
}

impl CalculationSet {
    /// Build the set for this tick.
    pub fn build(graph: &GraphEngine, smooth_curves: bool) -> Self {
        let mut keys: Vec<NodeKey> = graph.node_ids().iter().map(|&id| id.into()).collect();

        let mut support_count = 0;
        if smooth_curves {
            let live = graph
                .support()
                .iter()
                .map(|(id, _)| id)
                .filter(|&id| graph.is_support_live(id))
                .map(NodeKey::Support);

            let before = keys.len();
            keys.extend(live);
            support_count = keys.len() - before;
        }

        Self {
            keys,
            support_count,
        }
    }

    /// Keys in calculation order: graph nodes first, then support nodes.
    pub fn keys(&self) -> &[NodeKey] {
        &self.keys
    }

    /// Total number of nodes in the set.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of support nodes in the set.
    pub fn support_count(&self) -> usize {
        self.support_count
    }

    /// Whether `key` takes part in this tick.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.keys.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;
    use std::collections::HashSet;

    fn curved_graph() -> (GraphEngine, NodeId, NodeId, NodeId) {
        let mut graph = GraphEngine::new();
        let a = graph.add_node(0.0, 0.0);
        let b = graph.add_node(10.0, 0.0);
        let c = graph.add_node(0.0, 10.0);
        graph.add_edge(a, b, 5.0);
        graph.add_edge(b, c, 5.0);
        graph.ensure_support_nodes();
        (graph, a, b, c)
    }

    #[test]
    fn test_plain_set_is_node_collection() {
        let (graph, a, b, c) = curved_graph();
        let set = CalculationSet::build(&graph, false);

        assert_eq!(set.keys(), &[a.into(), b.into(), c.into()]);
        assert_eq!(set.support_count(), 0);
    }

    #[test]
    fn test_smooth_set_adds_live_support_nodes() {
        let (graph, ..) = curved_graph();
        let set = CalculationSet::build(&graph, true);

        assert_eq!(set.len(), 5);
        assert_eq!(set.support_count(), 2);
        for (id, _) in graph.support().iter() {
            assert!(set.contains(id.into()));
        }
    }

    #[test]
    fn test_stale_support_nodes_are_skipped() {
        let (mut graph, a, b, _) = curved_graph();
        let (ab, via) = graph
            .edges()
            .find(|(_, e)| e.from == a && e.to == b)
            .map(|(id, e)| (id, e.via.unwrap()))
            .unwrap();

        graph.remove_edge(ab);
        assert_eq!(graph.support().len(), 2);

        let set = CalculationSet::build(&graph, true);
        assert_eq!(set.support_count(), 1);
        assert!(!set.contains(via.into()));
    }

    #[test]
    fn test_disconnected_parent_is_not_live() {
        let (mut graph, _, b, _) = curved_graph();
        graph.remove_node(b);

        let set = CalculationSet::build(&graph, true);
        assert_eq!(set.len(), 2);
        assert_eq!(set.support_count(), 0);
    }

    #[test]
    fn test_keys_match_resolvable_nodes() {
        let (graph, ..) = curved_graph();
        let set = CalculationSet::build(&graph, true);

        for &key in set.keys() {
            assert!(graph.node(key).is_some(), "{key} should resolve");
        }
        let unique: HashSet<NodeKey> = set.keys().iter().copied().collect();
        assert_eq!(unique.len(), set.len());
    }
}
