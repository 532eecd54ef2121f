//! Task collection manager.
//!
//! [`TaskManager`] validates task drafts, delegates storage to a
//! [`Repository`], and reports absence as [`CollectionError::NotFound`].

use std::sync::Arc;

use todo_proto::task::{Task, TaskDraft, TaskId};

use crate::error::{CollectionError, required_text};
use crate::store::{InMemoryRepository, Record, Repository};

/// Message returned when a task draft has no usable description.
pub const DESCRIPTION_REQUIRED: &str = "Description is required";

/// Create/read/update/delete over the task collection.
#[derive(Clone)]
pub struct TaskManager {
    repo: Arc<dyn Repository<Task>>,
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryRepository::new()))
    }
}

impl TaskManager {
    /// Creates a manager over the given repository.
    #[must_use]
    pub fn new(repo: Arc<dyn Repository<Task>>) -> Self {
        Self { repo }
    }

    /// Returns every task in insertion order.
    #[must_use]
    pub fn list_all(&self) -> Vec<Task> {
        self.repo.list()
    }

    /// Looks up a task by id.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if no task has this id.
    pub fn get_by_id(&self, id: TaskId) -> Result<Task, CollectionError> {
        self.repo.get(id).ok_or_else(|| not_found(id))
    }

    /// Validates the draft and appends a new task with the next id.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Validation`] if the description is missing
    /// or blank, or [`CollectionError::IdsExhausted`] if the last task holds
    /// the largest id. The collection is left unchanged in both cases.
    pub fn create(&self, draft: TaskDraft) -> Result<Task, CollectionError> {
        let task = self
            .repo
            .insert(from_draft(TaskId::FIRST, draft)?)
            .ok_or(CollectionError::IdsExhausted { kind: Task::KIND })?;
        tracing::info!(task_id = %task.task_id, "task created");
        Ok(task)
    }

    /// Overwrites description, date, and labels of an existing task.
    ///
    /// The description is checked before the lookup, so an invalid draft
    /// for an unknown id reports a validation error.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Validation`] for a blank description or
    /// [`CollectionError::NotFound`] for an unknown id.
    pub fn update_by_id(&self, id: TaskId, draft: TaskDraft) -> Result<Task, CollectionError> {
        let replacement = from_draft(id, draft)?;
        let task = self.repo.replace(id, replacement).ok_or_else(|| not_found(id))?;
        tracing::info!(task_id = %id, "task updated");
        Ok(task)
    }

    /// Removes a task, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if no task has this id.
    pub fn delete_by_id(&self, id: TaskId) -> Result<Task, CollectionError> {
        let task = self.repo.remove(id).ok_or_else(|| not_found(id))?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(task)
    }
}

fn from_draft(task_id: TaskId, draft: TaskDraft) -> Result<Task, CollectionError> {
    Ok(Task {
        task_id,
        description: required_text(draft.description, DESCRIPTION_REQUIRED)?,
        date: draft.date,
        label_ids: draft.label_ids,
    })
}

const fn not_found(id: TaskId) -> CollectionError {
    CollectionError::NotFound {
        kind: Task::KIND,
        id: id.get(),
    }
}
