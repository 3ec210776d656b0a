//! Persistence module
//!
//! Storage adapters and the serialized format of the task collection.

mod adapter;
pub mod codec;
mod file;
mod memory;

pub use adapter::PersistenceAdapter;
pub use file::{validate_storage_key, FileAdapter};
pub use memory::MemoryAdapter;
