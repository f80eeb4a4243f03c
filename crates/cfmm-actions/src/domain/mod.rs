pub mod errors;
pub mod results;
pub mod value_objects;

pub use errors::*;
pub use results::*;
pub use value_objects::*;
