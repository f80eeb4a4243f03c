//! # cfmm-ordering
//!
//! Reference scheduler for action batches. Groups actions whose declared key
//! sets do not conflict so a host can run them in parallel.
//!
//! ## Architecture
//!
//! - **Domain**: batch entries, dependency graph, execution schedule
//! - **Algorithms**: conflict detection, dependency building, Kahn's sort
//! - **Ports**: [`ActionOrderingApi`]
//! - **Application**: [`OrderingService`], scheduling plus `rayon` execution
//!
//! Scheduling reads no state: conflicts come from declarations alone, and
//! dependency edges always run from the earlier submission to the later
//! one.

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::OrderingService;
pub use config::OrderingConfig;
pub use domain::entities::*;
pub use domain::errors::OrderingError;
pub use domain::value_objects::*;
pub use ports::inbound::ActionOrderingApi;
