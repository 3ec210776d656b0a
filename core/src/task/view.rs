//! Derived views over the task collection

use super::model::Task;

/// Tasks split by completion state, each side in collection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub incomplete: Vec<Task>,
    pub completed: Vec<Task>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.incomplete.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `tasks` into incomplete and completed, keeping relative order
pub fn partition(tasks: &[Task]) -> Partition {
    let (completed, incomplete): (Vec<Task>, Vec<Task>) =
        tasks.iter().cloned().partition(|task| task.completed);
    Partition {
        incomplete,
        completed,
    }
}
