//! Person records and the registry that owns them.

mod registry;
mod types;


pub use registry::PersonRegistry;
pub use types::{Person, PersonId};
