//! Task records and the request body used to create or replace them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::label::LabelId;

/// Identifier of a task, assigned by the server on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u32);

impl TaskId {
    /// The identifier given to the first task in an empty collection.
    pub const FIRST: Self = Self(1);

    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the identifier that follows this one, or `None` once the
    /// id space is exhausted.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier. Never changed by an update.
    pub task_id: TaskId,
    /// Free-form description, never blank.
    pub description: String,
    /// Optional due date (`YYYY-MM-DD`).
    pub date: Option<NaiveDate>,
    /// Labels attached to the task. Not checked against the label collection.
    pub label_ids: Vec<LabelId>,
}

/// Body of `POST /api/v1/task` and `PUT /api/v1/task/{id}`.
///
/// `description` is optional at the wire level so that a missing field is
/// reported as a validation error, not a decode failure. Any `taskId` sent
/// by the client is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    /// Required, must contain a non-whitespace character.
    pub description: Option<String>,
    /// Optional due date.
    pub date: Option<NaiveDate>,
    /// Attached label ids, in the order given.
    pub label_ids: Vec<LabelId>,
}

impl TaskDraft {
    /// Creates a draft with only a description set.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the attached label ids.
    #[must_use]
    pub fn with_labels(mut self, label_ids: Vec<LabelId>) -> Self {
        self.label_ids = label_ids;
        self
    }
}
