mod common;

use anyhow::Result;

use common::{init_logger, library_schema, person, unique_root};
use json_datastore::{
    DataStore, FetchRequest, SaveRequest, StoreConfiguration, StoreError, StoreRegistry,
};

/// Framework-side helper written against the trait only.
fn insert_and_count<S: DataStore>(store: &S, name: &str) -> json_datastore::Result<usize> {
    store.save(SaveRequest::new().insert(person(name, 1, name)))?;
    Ok(store.fetch(&FetchRequest::new("Person"))?.snapshots.len())
}

#[test]
fn registry_hands_out_one_store_per_name() -> Result<()> {
    init_logger();
    let root = unique_root("registry");
    let mut reg = StoreRegistry::new();

    let main = StoreConfiguration::new("main", Some(library_schema()), root.join("main.json"));
    let aux = StoreConfiguration::new("aux", Some(library_schema()), root.join("aux.json"));

    assert_eq!(insert_and_count(reg.open(main.clone())?, "a")?, 1);
    assert_eq!(insert_and_count(reg.open(aux)?, "b")?, 1);

    // same name, different file: the registered store is reused
    let alias = StoreConfiguration::new("main", Some(library_schema()), root.join("other.json"));
    let store = reg.open(alias)?;
    assert_eq!(DataStore::identifier(store), "main.json");
    assert_eq!(store.configuration(), &main);
    assert_eq!(insert_and_count(store, "c")?, 2);

    assert_eq!(reg.names(), vec!["aux", "main"]);
    assert!(!root.join("other.json").exists());
    Ok(())
}

#[test]
fn registry_rejects_configuration_without_schema() -> Result<()> {
    let mut reg = StoreRegistry::new();
    let bare = StoreConfiguration::new("bare", None, unique_root("bare").join("x.json"));
    assert!(matches!(reg.open(bare), Err(StoreError::MissingSchema { .. })));
    assert!(reg.get("bare").is_none());
    Ok(())
}
