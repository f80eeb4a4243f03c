//! # cfmm-state
//!
//! Storage substrate of the CFMM ledger.
//!
//! ## Role in System
//!
//! - **Key Codec**: collision-free keys, one prefix byte per entity type
//! - **Identifier Derivation**: content-addressed token and pool addresses
//! - **Record Schemas**: value layouts for balances, tokens, domains, pools
//! - **State Ports**: the read/write contract required from the host store
//! - **Scoped Views**: execution views restricted to declared keys
//!
//! ## Key Layout
//!
//! ```text
//! prefix:1 ‖ identifier-segment ‖ max-chunks:u16 (big-endian)
//! ```
//!
//! The chunk hint lets the host reserve space for `Allocate` keys without
//! decoding any value.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod storage;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
