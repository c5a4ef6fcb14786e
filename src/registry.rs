//! StoreRegistry: explicit owner of open stores, keyed by configuration.
//!
//! Configurations compare by name, so opening a second configuration with an
//! already-registered name hands back the existing store (its file location
//! and options win).

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;

use crate::config::StoreConfiguration;
use crate::error::Result;
use crate::store::JsonStore;

#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: HashMap<StoreConfiguration, JsonStore>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store registered under `configuration.name()`, constructing and
    /// registering it on first use.
    pub fn open(&mut self, configuration: StoreConfiguration) -> Result<&JsonStore> {
        match self.stores.entry(configuration) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(v) => {
                let store = JsonStore::new(v.key().clone())?;
                debug!("registry: opened '{}'", store.name());
                Ok(v.insert(store))
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&JsonStore> {
        self.stores.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<JsonStore> {
        self.stores.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.stores.keys().map(StoreConfiguration::name).collect();
        out.sort_unstable();
        out
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::schema::{EntityDescriptor, Schema};

    fn schema() -> Schema {
        Schema::new([EntityDescriptor::new("Person")])
    }

    #[test]
    fn same_name_reuses_store() {
        let mut reg = StoreRegistry::new();
        let a = StoreConfiguration::new("main", Some(schema()), "/tmp/jds-reg/a.json");
        let b = StoreConfiguration::new("main", Some(schema()), "/tmp/jds-reg/b.json");

        assert_eq!(reg.open(a).unwrap().identifier(), "a.json");
        assert_eq!(reg.open(b).unwrap().identifier(), "a.json");
        assert_eq!(reg.len(), 1);
        assert!(reg.contains("main"));
        assert_eq!(reg.names(), vec!["main"]);

        assert!(reg.remove("main").is_some());
        assert!(reg.is_empty());
        assert!(reg.get("main").is_none());
    }

    #[test]
    fn failed_open_registers_nothing() {
        let mut reg = StoreRegistry::new();
        let cfg = StoreConfiguration::new("bare", None, "/tmp/jds-reg/bare.json");
        assert!(matches!(reg.open(cfg), Err(StoreError::MissingSchema { .. })));
        assert!(reg.is_empty());
    }
}
