pub mod access;
pub mod changes;
pub mod derivation;
pub mod entities;
pub mod errors;
pub mod keys;
pub mod schema;

pub use access::*;
pub use changes::*;
pub use derivation::*;
pub use entities::*;
pub use errors::*;
pub use keys::*;
pub use schema::*;
