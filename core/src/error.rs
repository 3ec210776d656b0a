//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Storage write error: {0}")]
    StorageWrite(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Task store has not been hydrated yet")]
    NotHydrated,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Stable error classification for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    StorageRead,
    StorageWrite,
    Deserialization,
    Serialization,
    NotHydrated,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::StorageRead(_) => ErrorKind::StorageRead,
            Self::StorageWrite(_) => ErrorKind::StorageWrite,
            Self::Deserialization(_) => ErrorKind::Deserialization,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::NotHydrated => ErrorKind::NotHydrated,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Whether the error only affects durability, not the in-memory state.
    pub fn is_durability_loss(&self) -> bool {
        matches!(self, Self::StorageWrite(_) | Self::Serialization(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::TaskNotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(Error::NotHydrated.kind(), ErrorKind::NotHydrated);
        assert_eq!(
            Error::StorageWrite("disk full".into()).kind(),
            ErrorKind::StorageWrite
        );
    }

    #[test]
    fn test_durability_loss() {
        assert!(Error::StorageWrite("disk full".into()).is_durability_loss());
        assert!(!Error::StorageRead("gone".into()).is_durability_loss());
        assert!(!Error::TaskNotFound("x".into()).is_durability_loss());
    }
}
