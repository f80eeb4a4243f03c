//! Algorithms module for the reference scheduler
//!
//! Contains:
//! - Conflict detector
//! - Dependency graph builder
//! - Kahn's topological sort

pub mod conflict_detector;
pub mod dependency_builder;
pub mod kahns;

pub use conflict_detector::{conflict_percentage, detect_conflicts};
pub use dependency_builder::build_dependency_graph;
pub use kahns::kahns_topological_sort;
