//! store/save: batch save with identifier remapping.
//!
//! Pass order matters:
//! 1. read the document into the working set (identifier -> snapshot);
//! 2. remap: mint a permanent identifier for every inserted snapshot before
//!    anything is written into the working set, so records inserted together
//!    (including cycles) can reference each other. A temporary identifier
//!    may appear only once among the inserts;
//! 3. insert: copies under the permanent id, references rewritten;
//! 4. update: copies under the existing id, references rewritten;
//! 5. delete: remove by id, absent ids are a no-op;
//! 6. check that no temporary identifier survived;
//! 7. atomic rewrite of the whole document.
//!
//! The exclusive advisory lock (when enabled) spans steps 1–7.

use std::collections::HashMap;

use log::{debug, info};

use crate::error::{Result, StoreError};
use crate::identifier::PersistentIdentifier;
use crate::lock::acquire_exclusive;
use crate::metrics;
use crate::request::{SaveRequest, SaveResult};
use crate::snapshot::Snapshot;

use super::core::JsonStore;
use super::io::{read_document, write_document};

type RemapTable = HashMap<PersistentIdentifier, PersistentIdentifier>;

impl JsonStore {
    /// Apply one batch and persist it. Returns the temporary -> permanent
    /// identifier table for the inserted snapshots.
    pub fn save(&self, request: SaveRequest) -> Result<SaveResult> {
        let _guard = if self.configuration.advisory_lock {
            Some(acquire_exclusive(&self.path)?)
        } else {
            None
        };

        let res = self.save_locked(request);
        if res.is_err() {
            metrics::record_save_failed();
        }
        res
    }

    fn save_locked(&self, request: SaveRequest) -> Result<SaveResult> {
        let SaveRequest {
            inserted,
            updated,
            deleted,
        } = request;

        let mut working: HashMap<PersistentIdentifier, Snapshot> = read_document(&self.path)?
            .into_iter()
            .map(|s| (s.persistent_identifier().clone(), s))
            .collect();
        let before = working.len();

        let remapped = self.remap_inserted(&inserted)?;

        // Insert
        for snapshot in &inserted {
            let permanent = remapped.get(snapshot.persistent_identifier()).ok_or_else(|| {
                StoreError::MissingPermanentIdentifier(snapshot.persistent_identifier().clone())
            })?;
            working.insert(permanent.clone(), snapshot.copy(permanent.clone(), &remapped));
        }

        // Update (may target a record inserted in this same batch)
        for snapshot in &updated {
            let own = snapshot.persistent_identifier();
            let id = remapped.get(own).unwrap_or(own).clone();
            working.insert(id.clone(), snapshot.copy(id, &remapped));
        }

        // Delete
        let mut removed = 0usize;
        for snapshot in &deleted {
            let id = snapshot.persistent_identifier();
            if working.remove(id).is_some() {
                removed += 1;
            } else {
                debug!("save: delete of absent {} ignored", id);
            }
        }

        ensure_permanent(&working)?;

        let mut snapshots: Vec<Snapshot> = working.into_values().collect();
        snapshots.sort_by(|a, b| a.persistent_identifier().cmp(b.persistent_identifier()));

        let bytes = write_document(
            &self.path,
            &snapshots,
            self.configuration.pretty_print,
            self.configuration.sync_on_save,
        )?;

        metrics::record_save(inserted.len(), updated.len(), removed, bytes);
        info!(
            "save {}: +{} ~{} -{} ({} -> {} snapshot(s), {} B)",
            self.identifier,
            inserted.len(),
            updated.len(),
            removed,
            before,
            snapshots.len(),
            bytes
        );

        Ok(SaveResult {
            store_identifier: self.identifier.clone(),
            remapped_identifiers: remapped,
        })
    }

    /// temporary -> permanent for every inserted snapshot. Entity name comes
    /// from the temporary identifier; the primary key is a fresh UUID.
    fn remap_inserted(&self, inserted: &[Snapshot]) -> Result<RemapTable> {
        let mut table = RemapTable::with_capacity(inserted.len());
        for snapshot in inserted {
            let temporary = snapshot.persistent_identifier();
            if table.contains_key(temporary) {
                return Err(StoreError::DuplicateTemporaryIdentifier(temporary.clone()));
            }
            let permanent =
                PersistentIdentifier::generate(&self.identifier, &temporary.entity_name);
            table.insert(temporary.clone(), permanent);
        }
        debug!("save: remapped {} inserted identifier(s)", table.len());
        Ok(table)
    }
}

/// No temporary identifier may reach the backing document, neither as a
/// record's own id nor as a relationship reference.
fn ensure_permanent(working: &HashMap<PersistentIdentifier, Snapshot>) -> Result<()> {
    for (id, snapshot) in working {
        if id.is_temporary() {
            return Err(StoreError::UnresolvedTemporaryIdentifier(id.clone()));
        }
        if let Some(r) = snapshot.references().find(|r| r.is_temporary()) {
            return Err(StoreError::UnresolvedTemporaryIdentifier(r.clone()));
        }
    }
    Ok(())
}
