//! Store configuration.
//!
//! - Immutable value: store name, backing file location, schema, plus a few
//!   write-path options set through fluent `with_*` setters.
//! - Equality and hashing use the name only. Two configurations with the
//!   same name denote the same store even if the other fields differ; the
//!   registry relies on this.
//!
//! Defaults:
//! - pretty_print = true (human-readable backing document)
//! - sync_on_save = true (fsync temp file before rename, parent dir after)
//! - advisory_lock = true (fs2 lock on `<file>.lock` around read/save)

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::schema::Schema;

#[derive(Clone, Debug)]
pub struct StoreConfiguration {
    name: String,
    schema: Option<Schema>,
    file_location: PathBuf,

    /// Pretty-printed vs compact JSON on save.
    pub pretty_print: bool,

    /// fsync the temp document before rename (and the parent directory after).
    pub sync_on_save: bool,

    /// Take fs2 advisory locks: exclusive for save, shared for read.
    pub advisory_lock: bool,
}

impl StoreConfiguration {
    pub fn new(
        name: impl Into<String>,
        schema: Option<Schema>,
        file_location: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            schema,
            file_location: file_location.into(),
            pretty_print: true,
            sync_on_save: true,
            advisory_lock: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn file_location(&self) -> &Path {
        &self.file_location
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_pretty_print(mut self, on: bool) -> Self {
        self.pretty_print = on;
        self
    }

    pub fn with_sync_on_save(mut self, on: bool) -> Self {
        self.sync_on_save = on;
        self
    }

    pub fn with_advisory_lock(mut self, on: bool) -> Self {
        self.advisory_lock = on;
        self
    }
}

impl PartialEq for StoreConfiguration {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for StoreConfiguration {}

impl Hash for StoreConfiguration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// Lets name-keyed containers look configurations up by `&str`.
impl Borrow<str> for StoreConfiguration {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for StoreConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StoreConfiguration {{ \
             name: {}, \
             file_location: {}, \
             schema: {}, \
             pretty_print: {}, \
             sync_on_save: {}, \
             advisory_lock: {} \
             }}",
            self.name,
            self.file_location.display(),
            self.schema
                .as_ref()
                .map(|s| format!("{} entities", s.len()))
                .unwrap_or_else(|| "none".to_string()),
            self.pretty_print,
            self.sync_on_save,
            self.advisory_lock,
        )
    }
}
