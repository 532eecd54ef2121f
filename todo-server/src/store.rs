//! Repository abstraction over an ordered collection of records.
//!
//! [`Repository`] is the seam between the collection managers and storage.
//! [`InMemoryRepository`] is the only backend: a `Vec` behind a single
//! [`RwLock`], so id assignment and append happen under one write guard.
//!
//! Records are kept in insertion order. Identifiers are assigned as the last
//! record's id plus one (or [`RecordId::FIRST`] when empty), which keeps the
//! sequence strictly increasing but lets a deleted tail id be reissued. An
//! insert after a tail id of `u32::MAX` is refused rather than duplicated.

use parking_lot::RwLock;
use todo_proto::label::{Label, LabelId};
use todo_proto::task::{Task, TaskId};

/// Identifier type of a stored record.
pub trait RecordId: Copy + Eq + std::fmt::Display + Send + Sync + 'static {
    /// Identifier assigned to the first record of an empty collection.
    const FIRST: Self;

    /// Identifier that follows `self`, `None` once the id space is exhausted.
    #[must_use]
    fn next(self) -> Option<Self>;

    /// Raw numeric value, used in error messages and logs.
    fn raw(self) -> u32;
}

impl RecordId for TaskId {
    const FIRST: Self = TaskId::FIRST;

    fn next(self) -> Option<Self> {
        TaskId::next(self)
    }

    fn raw(self) -> u32 {
        self.get()
    }
}

impl RecordId for LabelId {
    const FIRST: Self = LabelId::FIRST;

    fn next(self) -> Option<Self> {
        LabelId::next(self)
    }

    fn raw(self) -> u32 {
        self.get()
    }
}

/// A record that can be held by a [`Repository`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier type.
    type Id: RecordId;

    /// Human-readable entity name (`"Task"`, `"Label"`).
    const KIND: &'static str;

    /// Returns the record's identifier.
    fn id(&self) -> Self::Id;

    /// Overwrites the record's identifier.
    fn set_id(&mut self, id: Self::Id);
}

impl Record for Task {
    type Id = TaskId;
    const KIND: &'static str = "Task";

    fn id(&self) -> TaskId {
        self.task_id
    }

    fn set_id(&mut self, id: TaskId) {
        self.task_id = id;
    }
}

impl Record for Label {
    type Id = LabelId;
    const KIND: &'static str = "Label";

    fn id(&self) -> LabelId {
        self.label_id
    }

    fn set_id(&mut self, id: LabelId) {
        self.label_id = id;
    }
}

/// Ordered storage for one record type.
///
/// Lookups are by identifier; absence is reported as `None` and the caller
/// decides how to surface it.
pub trait Repository<R: Record>: Send + Sync {
    /// Returns every record in insertion order.
    fn list(&self) -> Vec<R>;

    /// Returns the first record with the given id.
    fn get(&self, id: R::Id) -> Option<R>;

    /// Assigns the next identifier to `record`, appends it, and returns the
    /// stored copy. Returns `None`, storing nothing, if no identifier follows
    /// the last record's.
    fn insert(&self, record: R) -> Option<R>;

    /// Replaces the record with the given id, keeping that id. Returns the
    /// stored copy, or `None` if no such record exists.
    fn replace(&self, id: R::Id, record: R) -> Option<R>;

    /// Removes the record with the given id, returning it.
    fn remove(&self, id: R::Id) -> Option<R>;
}

/// In-memory [`Repository`] backed by a `Vec` under an [`RwLock`].
pub struct InMemoryRepository<R> {
    records: RwLock<Vec<R>>,
}

impl<R> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> InMemoryRepository<R> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R: Record> Repository<R> for InMemoryRepository<R> {
    fn list(&self) -> Vec<R> {
        self.records.read().clone()
    }

    fn get(&self, id: R::Id) -> Option<R> {
        self.records.read().iter().find(|r| r.id() == id).cloned()
    }

    fn insert(&self, mut record: R) -> Option<R> {
        let mut records = self.records.write();
        let id = match records.last() {
            Some(last) => last.id().next()?,
            None => <R::Id as RecordId>::FIRST,
        };
        record.set_id(id);
        records.push(record.clone());
        drop(records);
        Some(record)
    }

    fn replace(&self, id: R::Id, mut record: R) -> Option<R> {
        let mut records = self.records.write();
        let slot = records.iter_mut().find(|r| r.id() == id)?;
        record.set_id(id);
        *slot = record.clone();
        drop(records);
        Some(record)
    }

    fn remove(&self, id: R::Id) -> Option<R> {
        let mut records = self.records.write();
        let index = records.iter().position(|r| r.id() == id)?;
        Some(records.remove(index))
    }
}
