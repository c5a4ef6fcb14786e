//! store/io: backing document read and atomic rewrite.
//!
//! Write path: serialize → `<file>.tmp` in the same directory → (fsync) →
//! rename over `<file>` → (fsync parent dir, best-effort). A failure before
//! the rename leaves the previous document intact; the temp file is removed
//! best-effort.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Result, StoreError};
use crate::lock::acquire_shared;
use crate::metrics;
use crate::snapshot::Snapshot;

use super::core::JsonStore;

impl JsonStore {
    /// Every snapshot in the backing document, in document order.
    /// A missing file is an empty store, not an error. Never creates files
    /// or directories.
    pub fn read(&self) -> Result<Vec<Snapshot>> {
        let _guard = if self.configuration.advisory_lock {
            acquire_shared(&self.path)?
        } else {
            None
        };
        read_document(&self.path)
    }
}

pub(crate) fn read_document(path: &Path) -> Result<Vec<Snapshot>> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("read_document: {} not found, empty store", path.display());
            metrics::record_document_read(0);
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let snapshots: Vec<Snapshot> =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Deserialization {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "read_document: {} snapshot(s), {} B from {}",
        snapshots.len(),
        bytes.len(),
        path.display()
    );
    metrics::record_document_read(snapshots.len());
    Ok(snapshots)
}

/// `<dir>/<name>.tmp` next to the document.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace the document with `snapshots`. Returns the number of bytes written.
pub(crate) fn write_document(
    path: &Path,
    snapshots: &[Snapshot],
    pretty: bool,
    sync: bool,
) -> Result<usize> {
    let data = if pretty {
        serde_json::to_vec_pretty(snapshots)
    } else {
        serde_json::to_vec(snapshots)
    }
    .map_err(StoreError::Serialization)?;

    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let tmp = temp_path(path);
    if let Err(e) = write_temp(&tmp, &data, sync) {
        if tmp.is_file() {
            if let Err(rm) = fs::remove_file(&tmp) {
                warn!("write_document: cannot remove {}: {}", tmp.display(), rm);
            }
        }
        return Err(write_err(e));
    }

    if let Err(e) = fs::rename(&tmp, path) {
        if tmp.is_file() {
            if let Err(rm) = fs::remove_file(&tmp) {
                warn!("write_document: cannot remove {}: {}", tmp.display(), rm);
            }
        }
        return Err(write_err(e));
    }

    if sync {
        let _ = fsync_parent_dir(path);
    }

    debug!(
        "write_document: {} snapshot(s), {} B -> {}",
        snapshots.len(),
        data.len(),
        path.display()
    );
    Ok(data.len())
}

fn write_temp(tmp: &Path, data: &[u8], sync: bool) -> std::io::Result<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp)?;
    f.write_all(data)?;
    f.flush()?;
    if sync {
        f.sync_all()?;
    }
    Ok(())
}

// Best-effort fsync parent directory after rename (Unix only).
#[cfg(unix)]
fn fsync_parent_dir(p: &Path) -> std::io::Result<()> {
    use std::fs::File;
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
    }
    Ok(())
}
#[cfg(not(unix))]
fn fsync_parent_dir(_p: &Path) -> std::io::Result<()> {
    Ok(())
}
