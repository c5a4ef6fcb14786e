//! json_datastore: embedded snapshot store backed by a single JSON document.
//!
//! Layout:
//! - error: typed StoreError / Result
//! - identifier: PersistentIdentifier (temporary / permanent)
//! - snapshot: Snapshot + FieldValue (attributes and relationships)
//! - schema: Schema, EntityDescriptor, MigrationPlan hook
//! - config: StoreConfiguration (equality by name)
//! - request: fetch/save requests and results
//! - lock: fs2 advisory lock next to the backing file
//! - metrics: global atomic counters
//! - datastore: DataStore trait (framework seam)
//! - store: JsonStore (read / fetch / save)
//! - registry: StoreRegistry keyed by configuration name

pub mod config;
pub mod datastore;
pub mod error;
pub mod identifier;
pub mod lock;
pub mod metrics;
pub mod registry;
pub mod request;
pub mod schema;
pub mod snapshot;
pub mod store;

pub use config::StoreConfiguration;
pub use datastore::DataStore;
pub use error::{Result, StoreError};
pub use identifier::PersistentIdentifier;
pub use registry::StoreRegistry;
pub use request::{
    FetchRequest, FetchResult, Predicate, SaveRequest, SaveResult, SortDescriptor, SortOrder,
};
pub use schema::{EntityDescriptor, MigrationPlan, Schema};
pub use snapshot::{FieldValue, Snapshot};
pub use store::JsonStore;
