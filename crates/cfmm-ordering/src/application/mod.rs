pub mod service;

pub use service::OrderingService;
