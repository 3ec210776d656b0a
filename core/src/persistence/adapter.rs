//! Persistence adapter trait
//!
//! Defines the key-value storage boundary the task store writes through.

use async_trait::async_trait;

use crate::Result;

/// Durable storage for a single serialized blob
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    /// Read the last saved blob, or `None` if nothing was ever saved
    async fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the saved blob. A later `load` sees either the old or the
    /// new blob, never a partial one.
    async fn save(&self, blob: &[u8]) -> Result<()>;
}
