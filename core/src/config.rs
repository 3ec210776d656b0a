//! Store configuration
//!
//! Defaults can be overridden through `TODO_*` environment variables.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::persistence::{validate_storage_key, FileAdapter};
use crate::task::{Hydration, TaskStore, TextLimits};
use crate::{Error, Result};

pub const DEFAULT_DATA_DIR: &str = ".todo-data";
pub const DEFAULT_STORAGE_KEY: &str = "todoList";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub limits: TextLimits,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            limits: TextLimits::default(),
        }
    }
}

impl StoreConfig {
    /// Build a config from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source. Blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(dir) = var("TODO_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = var("TODO_STORAGE_KEY") {
            config.storage_key = key;
        }
        if let Some(raw) = var("TODO_MAX_TEXT_CHARS") {
            config.limits.max_text_chars = parse_limit("TODO_MAX_TEXT_CHARS", &raw)?;
        }
        if let Some(raw) = var("TODO_MAX_DESCRIPTION_CHARS") {
            config.limits.max_description_chars =
                parse_limit("TODO_MAX_DESCRIPTION_CHARS", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_storage_key(&self.storage_key)?;
        if self.limits.max_text_chars == 0 || self.limits.max_description_chars == 0 {
            return Err(Error::Config("Text limits must be positive".to_string()));
        }
        Ok(())
    }

    /// Open a file-backed store for this config and hydrate it
    pub async fn open_file_store(&self) -> Result<(TaskStore, Hydration)> {
        self.validate()?;
        let adapter = FileAdapter::new(&self.data_dir, &self.storage_key)?;
        info!("Using task file: {}", adapter.path().display());

        let store = TaskStore::with_limits(Arc::new(adapter), self.limits);
        let hydration = store.hydrate().await;
        Ok((store, hydration))
    }
}

fn parse_limit(name: &str, raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(Error::Config(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
    }
}
