//! # cfmm-actions
//!
//! Deterministic state transitions of the CFMM ledger.
//!
//! ## Architecture
//!
//! - **Actions**: one parameter struct per action, each an [`ActionHandler`]
//! - **Registry**: wire type id to decoder, built once
//! - **Config / Genesis**: native coin, pricing models, initial balances
//! - **Application**: [`ExecutionService`], the declare / execute / commit loop
//!
//! ## Execution Contract
//!
//! An executor sees only the keys its action declared. It performs every
//! fallible check before its first write, so a rejected action leaves state
//! byte-for-byte unchanged.

pub mod actions;
pub mod application;
pub mod config;
pub mod domain;
pub mod genesis;
pub mod ports;
pub mod registry;

pub use actions::{
    Action, ActionHandler, ClaimDomain, CreateLiquidityPool, CreateToken, GetTokenAddress, Hi,
    Transfer, Whois,
};
pub use application::ExecutionService;
pub use config::{LedgerConfig, LedgerParams, PricingModelConfig, PricingModels};
pub use domain::*;
pub use genesis::{Allocation, Genesis, GenesisConfig};
pub use ports::ActionExecutionApi;
pub use registry::ActionRegistry;
