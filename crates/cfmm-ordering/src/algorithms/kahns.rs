//! Kahn's Topological Sort Algorithm
//!
//! O(V + E). Each round takes every zero in-degree node as one parallel
//! group.

use std::collections::BTreeMap;

use crate::domain::entities::{DependencyGraph, ExecutionSchedule, ParallelGroup};
use crate::domain::errors::OrderingError;

/// Split the graph into parallel groups.
///
/// Groups list indices in ascending order, so the output is deterministic.
pub fn kahns_topological_sort(graph: &DependencyGraph) -> Result<ExecutionSchedule, OrderingError> {
    if graph.actions.is_empty() {
        return Ok(ExecutionSchedule::new(vec![]));
    }

    let mut in_degree: BTreeMap<usize, usize> = graph.in_degree.clone();

    // BTreeMap iteration is already sorted.
    let mut queue: Vec<usize> = in_degree
        .iter()
        .filter(|(_, &degree)| degree == 0)
        .map(|(index, _)| *index)
        .collect();

    let mut groups: Vec<ParallelGroup> = Vec::new();
    let mut scheduled_count = 0;

    while !queue.is_empty() {
        let current_group = std::mem::take(&mut queue);
        scheduled_count += current_group.len();

        let mut next_queue = Vec::new();
        for node in &current_group {
            let Some(neighbors) = graph.adjacency.get(node) else {
                continue;
            };
            for neighbor in neighbors {
                let Some(degree) = in_degree.get_mut(neighbor) else {
                    continue;
                };
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    next_queue.push(*neighbor);
                }
            }
        }

        groups.push(ParallelGroup::new(groups.len(), current_group));

        next_queue.sort_unstable();
        queue = next_queue;
    }

    if scheduled_count < graph.actions.len() {
        return Err(OrderingError::CycleDetected);
    }

    Ok(ExecutionSchedule::new(groups))
}
