//! Ports for the reference scheduler.

pub mod inbound;

pub use inbound::ActionOrderingApi;
