//! Schedule invariants
//!
//! Checked by the service in debug builds and by the tests.

use std::collections::BTreeSet;

use super::entities::{DependencyGraph, ExecutionSchedule, ParallelGroup};

/// Every edge source runs in a strictly earlier group than its target.
pub fn invariant_topological_order(schedule: &ExecutionSchedule, graph: &DependencyGraph) -> bool {
    let mut executed = BTreeSet::new();

    for group in &schedule.parallel_groups {
        let ready = group.indices.iter().all(|index| {
            graph
                .edges
                .iter()
                .filter(|edge| edge.to == *index)
                .all(|edge| executed.contains(&edge.from))
        });
        if !ready {
            return false;
        }
        executed.extend(group.indices.iter().copied());
    }

    true
}

/// No two members of a group have overlapping declarations.
pub fn invariant_parallel_safety(group: &ParallelGroup, graph: &DependencyGraph) -> bool {
    for (i, a) in group.indices.iter().enumerate() {
        for b in &group.indices[i + 1..] {
            let (Some(left), Some(right)) = (graph.actions.get(a), graph.actions.get(b)) else {
                return false;
            };
            if left.keys.conflicts_with(&right.keys).is_some() {
                return false;
            }
        }
    }
    true
}

/// Every node is scheduled exactly once.
pub fn invariant_completeness(schedule: &ExecutionSchedule, graph: &DependencyGraph) -> bool {
    let flat = schedule.flatten();
    let scheduled: BTreeSet<usize> = flat.iter().copied().collect();
    scheduled.len() == flat.len() && graph.actions.keys().copied().eq(scheduled)
}

/// All three invariants.
pub fn check_schedule(schedule: &ExecutionSchedule, graph: &DependencyGraph) -> bool {
    invariant_completeness(schedule, graph)
        && invariant_topological_order(schedule, graph)
        && schedule
            .parallel_groups
            .iter()
            .all(|group| invariant_parallel_safety(group, graph))
}
