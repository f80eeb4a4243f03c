//! Dependency Graph Builder
//!
//! Turns conflicts into edges. Edges always point from the earlier to the
//! later submission, so the graph is acyclic by construction and
//! conflicting actions keep their submission order.

use crate::domain::entities::{AnnotatedAction, Dependency, DependencyGraph};
use crate::domain::value_objects::Conflict;

/// Build the graph from actions sorted by index and their conflicts.
pub fn build_dependency_graph(
    actions: Vec<AnnotatedAction>,
    conflicts: &[Conflict],
) -> DependencyGraph {
    let mut graph = DependencyGraph::new();

    for action in actions {
        graph.add_node(action);
    }

    for conflict in conflicts {
        let (from, to) = if conflict.first < conflict.second {
            (conflict.first, conflict.second)
        } else {
            (conflict.second, conflict.first)
        };
        graph.add_edge(Dependency::new(from, to, conflict.kind, conflict.key.clone()));
    }

    graph
}
