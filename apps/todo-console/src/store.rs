//! Ordered in-memory task storage.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::validation::{validate_description, validate_title, ValidationErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrorKind),
    #[error("No task ids left; restart the application to start over")]
    IdsExhausted,
}

/// Tasks keyed by id. Ids start at 1, increase monotonically and are never
/// reused, even after a delete.
#[derive(Debug)]
pub struct TaskStore {
    tasks: BTreeMap<u32, Task>,
    next_id: u32,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, title: &str, description: &str) -> Result<&Task, AddError> {
        let title = validate_title(title)?;
        let description = validate_description(description)?;

        let id = self.next_id;
        // `u32::MAX` is never handed out; it marks the counter as spent.
        if id == u32::MAX {
            return Err(AddError::IdsExhausted);
        }
        self.next_id = id + 1;
        debug!(id, "task added");

        let task = self.tasks.entry(id).or_insert(Task {
            id,
            title,
            description,
            completed: false,
        });
        Ok(&*task)
    }

    /// All tasks in id order.
    pub fn list(&self) -> Vec<&Task> {
        self.tasks.values().collect()
    }

    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// `None` fields keep their current value. `Ok(None)` when `id` is unknown.
    pub fn update(
        &mut self,
        id: u32,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<&Task>, ValidationErrorKind> {
        let Some(task) = self.tasks.get_mut(&id) else {
            return Ok(None);
        };

        let title = title.map(validate_title).transpose()?;
        let description = description.map(validate_description).transpose()?;
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = description {
            task.description = description;
        }
        debug!(id, "task updated");
        Ok(Some(&*task))
    }

    /// Returns the new completion state, `None` when `id` is unknown.
    pub fn toggle(&mut self, id: u32) -> Option<bool> {
        let task = self.tasks.get_mut(&id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    pub fn delete(&mut self, id: u32) -> Option<Task> {
        self.tasks.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
