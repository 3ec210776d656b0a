//! Task store
//!
//! Owns the ordered task collection and writes the whole collection through a
//! [`PersistenceAdapter`] after every mutation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::model::{truncate_chars, Task, TaskDraft, TaskId, TaskPatch, TextLimits};
use super::view::{self, Partition};
use crate::persistence::{codec, PersistenceAdapter};
use crate::{Error, Result};

/// Result of [`TaskStore::hydrate`]
#[derive(Debug)]
pub enum Hydration {
    /// Tasks were loaded from storage
    Restored { count: usize },
    /// Nothing had been saved yet
    Empty,
    /// Stored data could not be read or parsed; the store started empty
    Recovered(Error),
    /// The store was already hydrated; nothing was loaded
    AlreadyHydrated,
}

/// Result of a mutation that was applied in memory
#[derive(Debug)]
pub struct MutationOutcome {
    /// The collection after the mutation
    pub tasks: Vec<Task>,
    /// Set when the collection could not be saved. The mutation still stands
    /// for this session but will be lost on restart.
    pub save_error: Option<Error>,
}

impl MutationOutcome {
    pub fn is_durable(&self) -> bool {
        self.save_error.is_none()
    }
}

#[derive(Default)]
struct StoreState {
    tasks: Vec<Task>,
    hydrated: bool,
}

struct Inner {
    adapter: Arc<dyn PersistenceAdapter>,
    limits: TextLimits,
    state: RwLock<StoreState>,
    /// Held from before a mutation is applied until its save completes, so
    /// saves run in mutation order. The state lock is released before I/O.
    save_gate: Mutex<()>,
}

/// Shared handle to the task collection
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<Inner>,
}

impl TaskStore {
    /// Create an un-hydrated store with default text limits
    pub fn new(adapter: Arc<dyn PersistenceAdapter>) -> Self {
        Self::with_limits(adapter, TextLimits::default())
    }

    pub fn with_limits(adapter: Arc<dyn PersistenceAdapter>, limits: TextLimits) -> Self {
        Self {
            inner: Arc::new(Inner {
                adapter,
                limits,
                state: RwLock::new(StoreState::default()),
                save_gate: Mutex::new(()),
            }),
        }
    }

    pub fn limits(&self) -> TextLimits {
        self.inner.limits
    }

    /// Load the saved collection. Must complete before any mutation is
    /// accepted; read and parse failures leave the store empty.
    pub async fn hydrate(&self) -> Hydration {
        let mut state = self.inner.state.write().await;
        if state.hydrated {
            return Hydration::AlreadyHydrated;
        }

        let outcome = match self.inner.adapter.load().await {
            Ok(None) => {
                info!("No saved tasks found, starting empty");
                Hydration::Empty
            }
            Ok(Some(blob)) => match codec::decode(&blob) {
                Ok(tasks) => {
                    info!("Hydrated {} tasks", tasks.len());
                    let count = tasks.len();
                    state.tasks = tasks;
                    Hydration::Restored { count }
                }
                Err(err) => {
                    warn!("Saved tasks are unreadable, starting empty: {}", err);
                    Hydration::Recovered(err)
                }
            },
            Err(err) => {
                warn!("Failed to load saved tasks, starting empty: {}", err);
                Hydration::Recovered(err)
            }
        };

        state.hydrated = true;
        outcome
    }

    pub async fn is_hydrated(&self) -> bool {
        self.inner.state.read().await.hydrated
    }

    /// Append a new incomplete task
    pub async fn add_task(
        &self,
        text: impl Into<String>,
        description: impl Into<String>,
        date_and_time: Option<DateTime<Utc>>,
    ) -> Result<MutationOutcome> {
        let limits = self.inner.limits;
        let text: String = text.into();
        let description: String = description.into();
        let (text, text_cut) = truncate_chars(&text, limits.max_text_chars);
        let (description, description_cut) =
            truncate_chars(&description, limits.max_description_chars);
        if text_cut || description_cut {
            warn!(
                "Truncated new task input (text: {}, description: {})",
                text_cut, description_cut
            );
        }

        let mut task = Task::new(text).with_description(description);
        task.date_and_time = date_and_time;

        self.commit(move |tasks| {
            debug!("Adding task {}", task.id);
            tasks.push(task);
            Ok(())
        })
        .await
    }

    /// Append the task described by a form draft
    pub async fn add_draft(&self, draft: TaskDraft) -> Result<MutationOutcome> {
        self.add_task(draft.text, draft.description, draft.date_and_time)
            .await
    }

    /// Merge `patch` into the task with `id`, keeping its position.
    ///
    /// Fails with [`Error::TaskNotFound`] if there is no such task; nothing is
    /// saved in that case.
    pub async fn edit_task(&self, id: &TaskId, patch: TaskPatch) -> Result<MutationOutcome> {
        let limits = self.inner.limits;
        self.commit(move |tasks| {
            let task = tasks
                .iter_mut()
                .find(|task| &task.id == id)
                .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
            let truncated = patch.apply(task, &limits);
            if !truncated.is_empty() {
                warn!("Truncated {:?} while editing task {}", truncated, id);
            }
            Ok(())
        })
        .await
    }

    /// Remove the task with `id`. Unknown ids are a no-op.
    pub async fn delete_task(&self, id: &TaskId) -> Result<MutationOutcome> {
        self.commit(|tasks| {
            let before = tasks.len();
            tasks.retain(|task| &task.id != id);
            if tasks.len() == before {
                debug!("Delete of unknown task {} ignored", id);
            }
            Ok(())
        })
        .await
    }

    pub async fn set_completion(&self, id: &TaskId, completed: bool) -> Result<MutationOutcome> {
        self.edit_task(id, TaskPatch::completion(completed)).await
    }

    /// Flip the completion flag of the task with `id`
    pub async fn toggle_completion(&self, id: &TaskId) -> Result<MutationOutcome> {
        self.commit(|tasks| {
            let task = tasks
                .iter_mut()
                .find(|task| &task.id == id)
                .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
            task.completed = !task.completed;
            Ok(())
        })
        .await
    }

    /// Snapshot of the full collection in insertion order
    pub async fn tasks(&self) -> Vec<Task> {
        self.inner.state.read().await.tasks.clone()
    }

    pub async fn get(&self, id: &TaskId) -> Option<Task> {
        let state = self.inner.state.read().await;
        state.tasks.iter().find(|task| &task.id == id).cloned()
    }

    /// Incomplete and completed tasks, recomputed on every call
    pub async fn partition(&self) -> Partition {
        let state = self.inner.state.read().await;
        view::partition(&state.tasks)
    }

    pub async fn len(&self) -> usize {
        self.inner.state.read().await.tasks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.state.read().await.tasks.is_empty()
    }

    /// Apply `mutate` and save the resulting collection.
    ///
    /// An `Err` from `mutate` leaves the collection untouched and skips the
    /// save. Save failures are reported in the outcome, not returned.
    async fn commit<F>(&self, mutate: F) -> Result<MutationOutcome>
    where
        F: FnOnce(&mut Vec<Task>) -> Result<()>,
    {
        let _gate = self.inner.save_gate.lock().await;
        let mut state = self.inner.state.write().await;
        if !state.hydrated {
            return Err(Error::NotHydrated);
        }

        mutate(&mut state.tasks)?;
        let tasks = state.tasks.clone();
        drop(state);
        let encoded = codec::encode(&tasks);

        let save_error = match encoded {
            Ok(blob) => self.inner.adapter.save(&blob).await.err(),
            Err(err) => Some(err),
        };
        match &save_error {
            Some(err) => warn!("Failed to save {} tasks: {}", tasks.len(), err),
            None => debug!("Saved {} tasks", tasks.len()),
        }

        Ok(MutationOutcome { tasks, save_error })
    }
}
