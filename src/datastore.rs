//! DataStore: the seam between an object-graph framework and a backend.
//!
//! The framework converts live objects to snapshots, calls `save`, applies
//! the returned remapping to its own references, and evaluates any
//! predicate/sort in memory after an unfiltered `fetch`.

use crate::error::Result;
use crate::request::{FetchRequest, FetchResult, SaveRequest, SaveResult};

pub trait DataStore {
    type Configuration;

    /// Configuration the store was built from.
    fn configuration(&self) -> &Self::Configuration;
    /// Store identifier stamped into every permanent identifier it mints.
    fn identifier(&self) -> &str;
    fn fetch(&self, request: &FetchRequest) -> Result<FetchResult>;
    fn save(&self, request: SaveRequest) -> Result<SaveResult>;
}
