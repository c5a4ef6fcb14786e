//! Advisory locking around the backing document.
//!
//! Cross-platform (fs2) advisory locks on a sidecar `<file>.lock`:
//! - Exclusive: held by `save` for the whole read-merge-write;
//! - Shared: held by `read`, so readers never observe a half-finished save
//!   of a cooperating writer.
//!
//! Only the exclusive path creates anything on disk (parent directory and
//! lock file). A shared lock is taken only on an existing lock file; before
//! the first save there is nothing to race with. The lock file is never
//! removed. Lock is released on Drop.

use fs2::FileExt;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

pub struct LockGuard {
    file: std::fs::File,
    path: PathBuf,
    mode: LockMode,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // fs2 unlock errors on drop are ignored deliberately.
        let _ = self.file.unlock();
    }
}

/// `<dir>/<name>.lock` for a backing file `<dir>/<name>`.
pub fn lock_file_path(document: &Path) -> PathBuf {
    let mut name = document
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    document.with_file_name(name)
}

/// Exclusive lock for a writer. Blocks until acquired.
/// Creates the parent directory of the document and the lock file if needed.
pub fn acquire_exclusive(document: &Path) -> Result<LockGuard> {
    let path = lock_file_path(document);
    let lock_err = |source| StoreError::Lock {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(lock_err)?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(&path)
        .map_err(lock_err)?;

    file.lock_exclusive().map_err(lock_err)?;
    Ok(LockGuard {
        file,
        path,
        mode: LockMode::Exclusive,
    })
}

/// Shared lock for a reader. Blocks until acquired.
/// Never creates anything: `Ok(None)` when the lock file (or its directory)
/// does not exist yet.
pub fn acquire_shared(document: &Path) -> Result<Option<LockGuard>> {
    let path = lock_file_path(document);
    let lock_err = |source| StoreError::Lock {
        path: path.clone(),
        source,
    };

    let file = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(lock_err(e)),
    };

    file.lock_shared().map_err(lock_err)?;
    Ok(Some(LockGuard {
        file,
        path,
        mode: LockMode::Shared,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_path_is_sidecar() {
        let p = lock_file_path(Path::new("/data/people.json"));
        assert_eq!(p, PathBuf::from("/data/people.json.lock"));
    }

    #[test]
    fn shared_locks_coexist() {
        let dir = std::env::temp_dir().join(format!("jds-lock-{}", std::process::id()));
        let doc = dir.join("doc.json");
        let x = acquire_exclusive(&doc).unwrap();
        assert_eq!(x.mode(), LockMode::Exclusive);
        drop(x);

        let a = acquire_shared(&doc).unwrap().expect("lock file exists");
        let b = acquire_shared(&doc).unwrap().expect("lock file exists");
        assert_eq!(a.mode(), LockMode::Shared);
        assert_eq!(a.path(), b.path());
        drop((a, b));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn shared_lock_creates_nothing() {
        let dir = std::env::temp_dir().join(format!("jds-lock-none-{}", std::process::id()));
        let doc = dir.join("nested").join("doc.json");
        assert!(acquire_shared(&doc).unwrap().is_none());
        assert!(!dir.exists());
        assert!(!lock_file_path(&doc).exists());
    }
}
