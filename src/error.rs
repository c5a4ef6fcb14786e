use std::path::PathBuf;

use thiserror::Error;

use crate::identifier::PersistentIdentifier;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Fetch requests with a predicate are rejected; filter in memory instead.
    #[error("predicates are not supported by this store, filter in memory")]
    UnsupportedPredicate,

    /// Fetch requests with a sort specification are rejected; sort in memory instead.
    #[error("sort descriptors are not supported by this store, sort in memory")]
    UnsupportedSort,

    #[error("configuration '{name}' has no schema")]
    MissingSchema { name: String },

    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse backing document {}: {source}", .path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialize backing document: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lock {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invariant defect: an inserted snapshot reached the insert pass without
    /// a permanent identifier.
    #[error("no permanent identifier was assigned to inserted snapshot {0}")]
    MissingPermanentIdentifier(PersistentIdentifier),

    #[error("temporary identifier {0} is not resolved by this save batch")]
    UnresolvedTemporaryIdentifier(PersistentIdentifier),

    /// Two inserted snapshots in one batch share a temporary identifier.
    #[error("temporary identifier {0} is used by more than one inserted snapshot")]
    DuplicateTemporaryIdentifier(PersistentIdentifier),
}

impl StoreError {
    /// Errors the caller recovers from by fetching everything and
    /// filtering/sorting in memory.
    pub fn prefers_in_memory(&self) -> bool {
        matches!(self, Self::UnsupportedPredicate | Self::UnsupportedSort)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
