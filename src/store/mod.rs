//! store: JSON-document snapshot store.
//!
//! Submodules:
//! - core.rs : JsonStore struct, construction, DataStore impl
//! - io.rs   : read / atomic write of the backing document
//! - fetch.rs: fetch (full scan, entity filter; predicates/sorts rejected)
//! - save.rs : save (remap, insert, update, delete, persist)

pub mod core;
pub mod fetch;
pub mod io;
pub mod save;

pub use self::core::JsonStore;
