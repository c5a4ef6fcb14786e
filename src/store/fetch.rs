//! store/fetch: full-scan fetch.
//!
//! Only unfiltered, unordered retrieval is served. Predicates and sort
//! descriptors are rejected before any I/O; the caller fetches everything
//! and filters/sorts in memory. The result holds snapshots whose entity name
//! matches the request (plus schema sub-entities when asked for), never the
//! whole cross-entity document.

use std::collections::HashSet;

use log::debug;

use crate::error::{Result, StoreError};
use crate::metrics;
use crate::request::{FetchRequest, FetchResult};

use super::core::JsonStore;

impl JsonStore {
    pub fn fetch(&self, request: &FetchRequest) -> Result<FetchResult> {
        if request.predicate.is_some() {
            metrics::record_fetch_rejected();
            return Err(StoreError::UnsupportedPredicate);
        }
        if !request.sort_by.is_empty() {
            metrics::record_fetch_rejected();
            return Err(StoreError::UnsupportedSort);
        }

        let accepted: HashSet<String> = if request.include_sub_entities {
            self.schema.sub_entities_of(&request.entity_name)
        } else {
            HashSet::from([request.entity_name.clone()])
        };

        let snapshots: Vec<_> = self
            .read()?
            .into_iter()
            .filter(|s| accepted.contains(s.entity_name()))
            .collect();

        debug!(
            "fetch {}: {} snapshot(s) from {}",
            request.entity_name,
            snapshots.len(),
            self.identifier
        );
        metrics::record_fetch();
        Ok(FetchResult { snapshots })
    }
}
