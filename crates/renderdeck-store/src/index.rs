// SPDX-License-Identifier: Apache-2.0

use crate::fs::{FileSystemAdapter, SystemFs};
use crate::{StoreError, StoreErrorCode};
use renderdeck_model::RenderingId;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Ordered rendering index persisted as one JSON array of identifiers.
///
/// Read-modify-write operations (`add`, `remove`, `update`) hold an in-process
/// writer lock from read to write, so concurrent requests in one server cannot
/// drop each other's changes. Separate processes sharing the same file are not
/// coordinated.
pub struct RenderingStore {
    index_path: PathBuf,
    fs: Arc<dyn FileSystemAdapter>,
    writer: Mutex<()>,
}

impl RenderingStore {
    #[must_use]
    pub fn new(index_path: PathBuf) -> Self {
        Self::with_fs(index_path, Arc::new(SystemFs))
    }

    #[must_use]
    pub fn with_fs(index_path: PathBuf, fs: Arc<dyn FileSystemAdapter>) -> Self {
        Self {
            index_path,
            fs,
            writer: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Current order. A missing index file means no renderings yet.
    pub fn get_all(&self) -> Result<Vec<RenderingId>, StoreError> {
        let raw = match self.fs.read(&self.index_path) {
            Ok(raw) => raw,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        serde_json::from_slice(&raw).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Corrupt,
                format!(
                    "index {} is not a valid id array: {e}",
                    self.index_path.display()
                ),
            )
        })
    }

    /// Replaces the whole index with `ids`, verbatim.
    pub fn set_all(&self, ids: &[RenderingId]) -> Result<(), StoreError> {
        let _guard = self.lock_writer()?;
        self.write_index(ids)
    }

    pub fn add(&self, id: &RenderingId) -> Result<(), StoreError> {
        self.update(|ids| ids.push(id.clone()))
    }

    /// Drops every occurrence of `id`; absent ids are a no-op.
    pub fn remove(&self, id: &RenderingId) -> Result<(), StoreError> {
        self.update(|ids| ids.retain(|existing| existing != id))
    }

    /// Runs `f` over the current index under the writer lock and persists the
    /// result when it changed.
    pub fn update<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Vec<RenderingId>) -> T,
    {
        let _guard = self.lock_writer()?;
        let before = self.get_all()?;
        let mut ids = before.clone();
        let out = f(&mut ids);
        if ids != before {
            self.write_index(&ids)?;
        }
        Ok(out)
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.writer.lock().map_err(|_| {
            StoreError::new(StoreErrorCode::Internal, "index writer lock poisoned")
        })
    }

    fn write_index(&self, ids: &[RenderingId]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(ids)
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
        if let Some(parent) = self.index_path.parent() {
            if !parent.as_os_str().is_empty() {
                self.fs.create_dir_all(parent)?;
            }
        }
        let mut tmp = self.index_path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        self.fs.write(&tmp, &bytes)?;
        self.fs.rename(&tmp, &self.index_path)?;
        debug!(
            count = ids.len(),
            path = %self.index_path.display(),
            "rendering index written"
        );
        Ok(())
    }
}
