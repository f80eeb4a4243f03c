//! Core entities for the reference scheduler

use std::collections::BTreeMap;

use cfmm_state::{ConflictKind, StateKey, StateKeys};
use serde::{Deserialize, Serialize};

use super::value_objects::BatchEntry;

/// A batch entry together with its declared keys.
#[derive(Clone, Debug)]
pub struct AnnotatedAction {
    pub entry: BatchEntry,
    pub keys: StateKeys,
}

impl AnnotatedAction {
    pub fn new(entry: BatchEntry) -> Self {
        let keys = entry.action.state_keys(&entry.actor);
        Self { entry, keys }
    }

    pub fn index(&self) -> usize {
        self.entry.index
    }
}

/// Dependency graph edge; `from` precedes `to` in submission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dependency {
    pub from: usize,
    pub to: usize,
    pub kind: ConflictKind,
    pub key: StateKey,
}

impl Dependency {
    pub fn new(from: usize, to: usize, kind: ConflictKind, key: StateKey) -> Self {
        Self {
            from,
            to,
            kind,
            key,
        }
    }
}

/// Nodes keyed by submission index.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    pub actions: BTreeMap<usize, AnnotatedAction>,
    pub edges: Vec<Dependency>,
    /// from -> [to, to, ...]
    pub adjacency: BTreeMap<usize, Vec<usize>>,
    pub in_degree: BTreeMap<usize, usize>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, action: AnnotatedAction) {
        let index = action.index();
        self.actions.insert(index, action);
        self.adjacency.entry(index).or_default();
        self.in_degree.entry(index).or_insert(0);
    }

    pub fn add_edge(&mut self, dep: Dependency) {
        self.adjacency.entry(dep.from).or_default().push(dep.to);
        *self.in_degree.entry(dep.to).or_insert(0) += 1;
        self.edges.push(dep);
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.adjacency
            .get(&from)
            .map(|neighbors| neighbors.contains(&to))
            .unwrap_or(false)
    }

    pub fn node_count(&self) -> usize {
        self.actions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Entries that may execute concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelGroup {
    pub group_id: usize,
    /// Submission indices, ascending
    pub indices: Vec<usize>,
}

impl ParallelGroup {
    pub fn new(group_id: usize, indices: Vec<usize>) -> Self {
        Self { group_id, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Ordered groups; every group runs after all earlier ones complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSchedule {
    pub parallel_groups: Vec<ParallelGroup>,
    pub total_actions: usize,
    pub max_parallelism: usize,
}

impl ExecutionSchedule {
    pub fn new(groups: Vec<ParallelGroup>) -> Self {
        let total = groups.iter().map(ParallelGroup::len).sum();
        let max_par = groups.iter().map(ParallelGroup::len).max().unwrap_or(0);

        Self {
            parallel_groups: groups,
            total_actions: total,
            max_parallelism: max_par,
        }
    }

    /// One group per entry, in submission order.
    pub fn sequential(indices: Vec<usize>) -> Self {
        let groups = indices
            .into_iter()
            .enumerate()
            .map(|(i, index)| ParallelGroup::new(i, vec![index]))
            .collect();
        Self::new(groups)
    }

    pub fn flatten(&self) -> Vec<usize> {
        self.parallel_groups
            .iter()
            .flat_map(|g| g.indices.iter().copied())
            .collect()
    }
}
