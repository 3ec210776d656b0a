//! Task module
//!
//! This module contains the task model, the task store and derived views.

mod model;
mod store;
mod view;

pub use model::*;
pub use store::{Hydration, MutationOutcome, TaskStore};
pub use view::{partition, Partition};
