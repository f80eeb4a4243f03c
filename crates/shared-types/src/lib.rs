//! # Shared Types Crate
//!
//! Primitives shared by every ledger crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the 33-byte [`Address`] layout
//!   (`kind byte ‖ 32-byte id`) is defined once, here.
//! - **Domain Separation**: every derived address carries an [`AddressKind`]
//!   byte, so identical payloads hashed for two entity kinds never alias.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
