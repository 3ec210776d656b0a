//! In-memory persistence adapter
//!
//! Keeps the blob in process memory. Useful for ephemeral stores and for
//! exercising failure paths without touching the filesystem.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::adapter::PersistenceAdapter;
use crate::{Error, Result};

#[derive(Default)]
struct MemoryState {
    blob: Option<Vec<u8>>,
    saves: usize,
    fail_reads: bool,
    fail_writes: bool,
}

#[derive(Default)]
pub struct MemoryAdapter {
    state: Mutex<MemoryState>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously saved blob
    pub fn with_blob(blob: impl Into<Vec<u8>>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                blob: Some(blob.into()),
                ..MemoryState::default()
            }),
        }
    }

    /// Current saved blob
    pub async fn blob(&self) -> Option<Vec<u8>> {
        self.state.lock().await.blob.clone()
    }

    /// Number of successful saves so far
    pub async fn save_count(&self) -> usize {
        self.state.lock().await.saves
    }

    /// Make subsequent loads fail with `StorageRead`
    pub async fn set_fail_reads(&self, fail: bool) {
        self.state.lock().await.fail_reads = fail;
    }

    /// Make subsequent saves fail with `StorageWrite`
    pub async fn set_fail_writes(&self, fail: bool) {
        self.state.lock().await.fail_writes = fail;
    }
}

#[async_trait]
impl PersistenceAdapter for MemoryAdapter {
    async fn load(&self) -> Result<Option<Vec<u8>>> {
        let state = self.state.lock().await;
        if state.fail_reads {
            return Err(Error::StorageRead("memory adapter read failure".to_string()));
        }
        Ok(state.blob.clone())
    }

    async fn save(&self, blob: &[u8]) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.fail_writes {
            return Err(Error::StorageWrite(
                "memory adapter write failure".to_string(),
            ));
        }
        state.blob = Some(blob.to_vec());
        state.saves += 1;
        Ok(())
    }
}
