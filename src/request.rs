//! Collaborator boundary: what the framework hands the store, and what it
//! gets back. The store never sees live domain objects.

use std::collections::HashMap;

use crate::identifier::PersistentIdentifier;
use crate::snapshot::Snapshot;

/// Opaque filter description from the framework. The store does not
/// evaluate predicates; carrying one makes a fetch fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Forward,
    Reverse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDescriptor {
    pub key: String,
    pub order: SortOrder,
}

impl SortDescriptor {
    pub fn forward(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Forward,
        }
    }

    pub fn reverse(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Reverse,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub entity_name: String,
    pub predicate: Option<Predicate>,
    pub sort_by: Vec<SortDescriptor>,
    /// Also return snapshots of entities inheriting from `entity_name`
    /// (per the store's schema). Off by default: exact entity match.
    pub include_sub_entities: bool,
}

impl FetchRequest {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            predicate: None,
            sort_by: Vec::new(),
            include_sub_entities: false,
        }
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn sorted_by(mut self, sort: SortDescriptor) -> Self {
        self.sort_by.push(sort);
        self
    }

    pub fn including_sub_entities(mut self) -> Self {
        self.include_sub_entities = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub snapshots: Vec<Snapshot>,
}

/// One batch of changes. `inserted` carry temporary identifiers,
/// `updated` / `deleted` carry permanent ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveRequest {
    pub inserted: Vec<Snapshot>,
    pub updated: Vec<Snapshot>,
    pub deleted: Vec<Snapshot>,
}

impl SaveRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, snapshot: Snapshot) -> Self {
        self.inserted.push(snapshot);
        self
    }

    pub fn update(mut self, snapshot: Snapshot) -> Self {
        self.updated.push(snapshot);
        self
    }

    pub fn delete(mut self, snapshot: Snapshot) -> Self {
        self.deleted.push(snapshot);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveResult {
    pub store_identifier: String,
    /// temporary -> permanent, one entry per inserted snapshot.
    pub remapped_identifiers: HashMap<PersistentIdentifier, PersistentIdentifier>,
}

impl SaveResult {
    pub fn permanent_for(&self, temporary: &PersistentIdentifier) -> Option<&PersistentIdentifier> {
        self.remapped_identifiers.get(temporary)
    }
}
