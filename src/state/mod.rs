pub mod factory;
pub mod json_store;
pub mod store;

pub use factory::{create_in_memory_store, create_store};
pub use json_store::JsonFileStore;
pub use store::*;
