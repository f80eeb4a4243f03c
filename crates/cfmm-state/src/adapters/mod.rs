pub mod memory_db;
pub mod scoped;

pub use memory_db::*;
pub use scoped::*;
