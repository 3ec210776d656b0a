//! Core library for the to-do list app
//!
//! This crate contains the on-device task logic, including:
//! - The task model and the task store
//! - Persistence adapters and the stored format
//! - Configuration and tracing bootstrap

pub mod config;
pub mod display;
pub mod error;
pub mod persistence;
pub mod task;
pub mod telemetry;

pub use config::StoreConfig;
pub use error::{Error, ErrorKind};
pub use task::{Hydration, MutationOutcome, Task, TaskId, TaskPatch, TaskStore};
pub type Result<T> = std::result::Result<T, Error>;
