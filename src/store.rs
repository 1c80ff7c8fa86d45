//! Rules store handle
//!
//! Opens the sled database at the validated storage path. Record layout belongs to the
//! rules engine; this module only owns the handle's lifecycle.

use crate::error::StorageError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sled database backing the rules engine
pub struct RulesStore {
    db: sled::Db,
    path: PathBuf,
}

impl RulesStore {
    /// Open the database at `path`, creating it if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let db = sled::open(&path).map_err(|source| StorageError::Open {
            path: path.clone(),
            source,
        })?;
        debug!(storage_path = %path.display(), recovered = db.was_recovered(), "Opened rules store");
        Ok(Self { db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the underlying sled database
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// Flush pending writes to disk, returning the number of bytes flushed.
    pub fn flush(&self) -> Result<usize, StorageError> {
        self.db.flush().map_err(StorageError::Flush)
    }
}
