// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use std::path::{Path, PathBuf};

/// File-system seam used by the index store and the asset directory manager.
///
/// Failures carry `StoreErrorCode::NotFound` when the underlying error is a missing
/// path so callers can tell "absent" from "broken".
pub trait FileSystemAdapter: Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError>;
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError>;
    fn create_dir_all(&self, path: &Path) -> Result<(), StoreError>;
    fn remove_dir_all(&self, path: &Path) -> Result<(), StoreError>;
    fn rename(&self, src: &Path, dst: &Path) -> Result<(), StoreError>;
    fn canonicalize(&self, path: &Path) -> Result<PathBuf, StoreError>;
    fn is_dir(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFs;

impl FileSystemAdapter for SystemFs {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        std::fs::read(path).map_err(|e| StoreError::io(path, &e))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        std::fs::write(path, bytes).map_err(|e| StoreError::io(path, &e))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), StoreError> {
        std::fs::create_dir_all(path).map_err(|e| StoreError::io(path, &e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), StoreError> {
        std::fs::remove_dir_all(path).map_err(|e| StoreError::io(path, &e))
    }

    fn rename(&self, src: &Path, dst: &Path) -> Result<(), StoreError> {
        std::fs::rename(src, dst).map_err(|e| StoreError::io(src, &e))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf, StoreError> {
        std::fs::canonicalize(path).map_err(|e| StoreError::io(path, &e))
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
