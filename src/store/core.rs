//! store/core: JsonStore struct and construction.
//!
//! Single-writer contract: one JsonStore per backing file per process is the
//! supported setup. With `advisory_lock` on (default), cooperating stores on
//! the same file serialize their saves through `<file>.lock`; with it off,
//! concurrent saves are last-writer-wins and may drop each other's changes.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::StoreConfiguration;
use crate::datastore::DataStore;
use crate::error::{Result, StoreError};
use crate::request::{FetchRequest, FetchResult, SaveRequest, SaveResult};
use crate::schema::{MigrationPlan, Schema};

#[derive(Debug)]
pub struct JsonStore {
    pub(crate) configuration: StoreConfiguration,
    pub(crate) identifier: String,
    pub(crate) schema: Schema,
    pub(crate) path: PathBuf,
}

impl JsonStore {
    /// Build a store for `configuration`. No I/O happens here; a missing
    /// backing file is an empty store.
    pub fn new(configuration: StoreConfiguration) -> Result<Self> {
        Self::open_with_migration_plan(configuration, None)
    }

    /// As [`JsonStore::new`]; the migration plan is accepted and ignored.
    pub fn open_with_migration_plan(
        configuration: StoreConfiguration,
        _migration_plan: Option<&dyn MigrationPlan>,
    ) -> Result<Self> {
        let schema = configuration
            .schema()
            .cloned()
            .ok_or_else(|| StoreError::MissingSchema {
                name: configuration.name().to_string(),
            })?;
        let path = configuration.file_location().to_path_buf();
        let identifier = store_identifier_for(&path);

        debug!(
            "json store '{}' ({}) over {}",
            configuration.name(),
            identifier,
            path.display()
        );

        Ok(Self {
            configuration,
            identifier,
            schema,
            path,
        })
    }

    pub fn name(&self) -> &str {
        self.configuration.name()
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn configuration(&self) -> &StoreConfiguration {
        &self.configuration
    }

    /// Backing document path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Store identifier = base name of the backing file.
fn store_identifier_for(path: &Path) -> String {
    match path.file_name() {
        Some(n) => n.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}

impl DataStore for JsonStore {
    type Configuration = StoreConfiguration;

    fn configuration(&self) -> &StoreConfiguration {
        &self.configuration
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn fetch(&self, request: &FetchRequest) -> Result<FetchResult> {
        JsonStore::fetch(self, request)
    }

    fn save(&self, request: SaveRequest) -> Result<SaveResult> {
        JsonStore::save(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EntityDescriptor;

    struct NoopPlan;
    impl MigrationPlan for NoopPlan {}

    #[test]
    fn identifier_is_file_base_name() {
        let cfg = StoreConfiguration::new(
            "people",
            Some(Schema::new([EntityDescriptor::new("Person")])),
            "/var/data/people.json",
        );
        let plan: &dyn MigrationPlan = &NoopPlan;
        let store = JsonStore::open_with_migration_plan(cfg, Some(plan)).unwrap();
        assert_eq!(store.identifier(), "people.json");
        assert_eq!(store.name(), "people");
        assert!(store.schema().contains("Person"));
    }

    #[test]
    fn missing_schema_fails_construction() {
        let cfg = StoreConfiguration::new("people", None, "/var/data/people.json");
        match JsonStore::new(cfg) {
            Err(StoreError::MissingSchema { name }) => assert_eq!(name, "people"),
            other => panic!("expected MissingSchema, got {other:?}"),
        }
    }
}
