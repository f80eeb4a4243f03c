//! # CFMM Ledger Test Suite
//!
//! Cross-crate scenarios. Unit tests live beside the code they cover.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── ledger_flows.rs        # genesis, actions, wire decoding, telemetry
//!     └── parallel_execution.rs  # scheduler batches against a shared store
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cfmm-tests
//! cargo test -p cfmm-tests integration::parallel_execution::
//! ```

pub mod integration;
