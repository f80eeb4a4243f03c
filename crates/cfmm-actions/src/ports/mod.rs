//! Ports for the execution layer.

pub mod inbound;

pub use inbound::ActionExecutionApi;
