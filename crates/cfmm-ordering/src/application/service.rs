//! Ordering Service
//!
//! Orchestrates the scheduling pipeline:
//! 1. Validate input
//! 2. Annotate entries with their declared keys
//! 3. Detect conflicts and check the fallback threshold
//! 4. Build the dependency graph
//! 5. Execute Kahn's algorithm

use cfmm_actions::{ActionExecutionApi, ExecutionError};
use cfmm_telemetry::{metric_inc, BATCHES_SCHEDULED};
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::{debug, error, info, warn};

use crate::algorithms::{
    build_dependency_graph, conflict_percentage, detect_conflicts, kahns_topological_sort,
};
use crate::config::OrderingConfig;
use crate::domain::entities::{AnnotatedAction, DependencyGraph, ExecutionSchedule};
use crate::domain::errors::OrderingError;
use crate::domain::invariants;
use crate::domain::value_objects::{ActionOutcome, BatchEntry};
use crate::ports::inbound::ActionOrderingApi;

#[derive(Debug, Clone, Default)]
pub struct OrderingService {
    config: OrderingConfig,
}

impl OrderingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OrderingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    fn validate_batch(&self, entries: &[BatchEntry]) -> Result<(), OrderingError> {
        if entries.is_empty() {
            return Err(OrderingError::EmptyBatch);
        }
        if entries.len() > self.config.max_batch_size {
            return Err(OrderingError::BatchTooLarge {
                size: entries.len(),
                max: self.config.max_batch_size,
            });
        }

        let mut seen = BTreeSet::new();
        for entry in entries {
            if !seen.insert(entry.index) {
                return Err(OrderingError::DuplicateIndex(entry.index));
            }
        }
        Ok(())
    }

    fn plan(
        &self,
        entries: &[BatchEntry],
    ) -> Result<(ExecutionSchedule, DependencyGraph), OrderingError> {
        self.validate_batch(entries)?;
        info!(action_count = entries.len(), "Scheduling action batch");

        let mut actions: Vec<AnnotatedAction> =
            entries.iter().cloned().map(AnnotatedAction::new).collect();
        actions.sort_by_key(AnnotatedAction::index);
        let indices: Vec<usize> = actions.iter().map(AnnotatedAction::index).collect();

        let conflicts = detect_conflicts(&actions);
        debug!(conflict_count = conflicts.len(), "Detected conflicts");

        let percent = conflict_percentage(&conflicts, actions.len());
        let graph = build_dependency_graph(actions, &conflicts);

        let schedule = if percent > self.config.conflict_threshold_percent {
            warn!(
                conflict_percent = percent,
                threshold = self.config.conflict_threshold_percent,
                "Conflict threshold exceeded, falling back to sequential"
            );
            ExecutionSchedule::sequential(indices)
        } else {
            if graph.edge_count() > self.config.max_edge_count {
                return Err(OrderingError::TooManyEdges {
                    count: graph.edge_count(),
                    max: self.config.max_edge_count,
                });
            }
            kahns_topological_sort(&graph)?
        };
        debug_assert!(invariants::check_schedule(&schedule, &graph));

        metric_inc!(BATCHES_SCHEDULED);
        info!(
            total_actions = schedule.total_actions,
            parallel_groups = schedule.parallel_groups.len(),
            max_parallelism = schedule.max_parallelism,
            "Action batch scheduled"
        );
        Ok((schedule, graph))
    }
}

impl ActionOrderingApi for OrderingService {
    fn schedule(&self, entries: &[BatchEntry]) -> Result<ExecutionSchedule, OrderingError> {
        self.plan(entries).map(|(schedule, _)| schedule)
    }

    fn execute_batch<E: ActionExecutionApi>(
        &self,
        executor: &E,
        entries: Vec<BatchEntry>,
    ) -> Result<Vec<ActionOutcome>, OrderingError> {
        let (schedule, graph) = self.plan(&entries)?;
        let mut outcomes = Vec::with_capacity(schedule.total_actions);

        let run = |entry: &BatchEntry| ActionOutcome {
            index: entry.index,
            actor: entry.actor,
            result: executor.execute(&entry.actor, &entry.action),
        };

        for group in &schedule.parallel_groups {
            let members: Vec<&BatchEntry> = group
                .indices
                .iter()
                .filter_map(|index| graph.actions.get(index).map(|a| &a.entry))
                .collect();

            // Members of a group never conflict, so commit order inside it is
            // irrelevant.
            let mut results: Vec<ActionOutcome> =
                if members.len() < self.config.parallel_threshold {
                    members.into_iter().map(run).collect()
                } else {
                    members.into_par_iter().map(run).collect()
                };

            let fatal = results.iter().find_map(|outcome| match &outcome.result {
                Err(ExecutionError::Fatal(err)) => Some((outcome.index, err.clone())),
                _ => None,
            });
            if let Some((index, source)) = fatal {
                error!(
                    group = group.group_id,
                    index,
                    error = %source,
                    "Batch halted on state fault"
                );
                return Err(OrderingError::Fatal { index, source });
            }

            debug!(group = group.group_id, size = results.len(), "Group executed");
            outcomes.append(&mut results);
        }

        outcomes.sort_by_key(|outcome| outcome.index);
        Ok(outcomes)
    }
}
