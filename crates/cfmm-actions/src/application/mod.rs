pub mod service;

pub use service::ExecutionService;
