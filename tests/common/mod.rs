#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use json_datastore::{
    EntityDescriptor, FieldValue, JsonStore, PersistentIdentifier, Schema, Snapshot,
    StoreConfiguration,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique scratch directory for one test.
pub fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("jdstest-{prefix}-{pid}-{t}-{id}"))
}

pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

pub fn library_schema() -> Schema {
    Schema::new([
        EntityDescriptor::new("Person"),
        EntityDescriptor::new("Author"),
        EntityDescriptor::new("Book"),
    ])
}

pub fn ui_schema() -> Schema {
    Schema::new([
        EntityDescriptor::new("App"),
        EntityDescriptor::new("Window"),
        EntityDescriptor::new("Component"),
        EntityDescriptor::inheriting("Button", "Component"),
        EntityDescriptor::inheriting("Field", "Component"),
    ])
}

/// Store over `<root>/<file>` with the given schema.
pub fn open_store(prefix: &str, file: &str, schema: Schema) -> JsonStore {
    init_logger();
    let path = unique_root(prefix).join(file);
    let cfg = StoreConfiguration::new(prefix, Some(schema), path);
    JsonStore::new(cfg).expect("store with schema must construct")
}

pub fn person(temp_key: &str, id: i64, name: &str) -> Snapshot {
    Snapshot::new(PersistentIdentifier::temporary("Person", temp_key))
        .with_field("id", FieldValue::attribute(id))
        .with_field("name", FieldValue::attribute(name))
}

pub fn name_of(s: &Snapshot) -> Option<&str> {
    s.field("name")
        .and_then(FieldValue::as_attribute)
        .and_then(|v| v.as_str())
}
