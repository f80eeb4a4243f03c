//! Conflict Detector
//!
//! Pairwise comparison of declared key sets.

use crate::domain::entities::AnnotatedAction;
use crate::domain::value_objects::Conflict;

/// Every conflicting pair, ordered by (first, second) submission index.
///
/// `actions` must be sorted by index.
pub fn detect_conflicts(actions: &[AnnotatedAction]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for (i, first) in actions.iter().enumerate() {
        for second in &actions[i + 1..] {
            if let Some((key, kind)) = first.keys.conflicts_with(&second.keys) {
                conflicts.push(Conflict {
                    first: first.index(),
                    second: second.index(),
                    kind,
                    key,
                });
            }
        }
    }

    conflicts
}

/// Conflicting pairs as a share of all pairs, 0..=100.
pub fn conflict_percentage(conflicts: &[Conflict], action_count: usize) -> u8 {
    if action_count < 2 {
        return 0;
    }
    let pairs = action_count * (action_count - 1) / 2;
    let percent = conflicts.len().saturating_mul(100) / pairs;
    percent.min(100) as u8
}
