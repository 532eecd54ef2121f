//! Label collection manager. Labels are never deleted.

use std::sync::Arc;

use todo_proto::label::{Label, LabelDraft, LabelId};

use crate::error::{CollectionError, required_text};
use crate::store::{InMemoryRepository, Record, Repository};

/// Message returned when a label draft has no usable name.
pub const NAME_REQUIRED: &str = "Label name is required";

/// Create/read/update over the label collection.
#[derive(Clone)]
pub struct LabelManager {
    repo: Arc<dyn Repository<Label>>,
}

impl Default for LabelManager {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryRepository::new()))
    }
}

impl LabelManager {
    /// Creates a manager over the given repository.
    #[must_use]
    pub fn new(repo: Arc<dyn Repository<Label>>) -> Self {
        Self { repo }
    }

    /// Returns every label in insertion order.
    #[must_use]
    pub fn list_all(&self) -> Vec<Label> {
        self.repo.list()
    }

    /// Looks up a label by id.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if no label has this id.
    pub fn get_by_id(&self, id: LabelId) -> Result<Label, CollectionError> {
        self.repo.get(id).ok_or_else(|| not_found(id))
    }

    /// Validates the draft and appends a new label with the next id.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Validation`] if the name is missing or blank,
    /// or [`CollectionError::IdsExhausted`] if no id follows the last label's.
    pub fn create(&self, draft: LabelDraft) -> Result<Label, CollectionError> {
        let label = self
            .repo
            .insert(from_draft(LabelId::FIRST, draft)?)
            .ok_or(CollectionError::IdsExhausted { kind: Label::KIND })?;
        tracing::info!(label_id = %label.label_id, "label created");
        Ok(label)
    }

    /// Replaces the name of an existing label.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Validation`] for a blank name or
    /// [`CollectionError::NotFound`] for an unknown id.
    pub fn update_by_id(&self, id: LabelId, draft: LabelDraft) -> Result<Label, CollectionError> {
        let replacement = from_draft(id, draft)?;
        let label = self.repo.replace(id, replacement).ok_or_else(|| not_found(id))?;
        tracing::info!(label_id = %id, "label updated");
        Ok(label)
    }
}

fn from_draft(label_id: LabelId, draft: LabelDraft) -> Result<Label, CollectionError> {
    Ok(Label {
        label_id,
        name: required_text(draft.name, NAME_REQUIRED)?,
    })
}

const fn not_found(id: LabelId) -> CollectionError {
    CollectionError::NotFound {
        kind: Label::KIND,
        id: id.get(),
    }
}
