// SPDX-License-Identifier: Apache-2.0

use crate::fs::{FileSystemAdapter, SystemFs};
use crate::paths::{confine_relative_path, rendering_dir, staging_dir};
use crate::{StoreError, StoreErrorCode};
use renderdeck_model::{
    additional_information, AssetFile, RenderingId, RenderingParams, ADDITIONAL_INFORMATION_FILE,
    PARAMS_FILE,
};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything stored for one rendering, held as a single value until it is
/// written out.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderingAssets {
    pub thumbnail: Vec<u8>,
    pub cameras: Vec<u8>,
    pub images: Vec<u8>,
    pub bundle: Vec<u8>,
    pub params: RenderingParams,
}

impl RenderingAssets {
    #[must_use]
    pub fn file(&self, file: AssetFile) -> &[u8] {
        match file {
            AssetFile::Thumbnail => &self.thumbnail,
            AssetFile::Cameras => &self.cameras,
            AssetFile::Images => &self.images,
            AssetFile::Bundle => &self.bundle,
        }
    }

    fn entries(&self) -> Result<Vec<(&'static str, Cow<'_, [u8]>)>, StoreError> {
        self.params.validate()?;
        let params = serde_json::to_vec(&self.params)
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
        let mut out: Vec<(&'static str, Cow<'_, [u8]>)> = AssetFile::ALL
            .into_iter()
            .map(|f| (f.file_name(), Cow::Borrowed(self.file(f))))
            .collect();
        out.push((PARAMS_FILE, Cow::Owned(params)));
        out.push((
            ADDITIONAL_INFORMATION_FILE,
            Cow::Borrowed(additional_information().as_bytes()),
        ));
        Ok(out)
    }
}

/// Per-rendering directory tree under one asset root.
pub struct AssetDirectory {
    root: PathBuf,
    fs: Arc<dyn FileSystemAdapter>,
}

impl AssetDirectory {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self::with_fs(root, Arc::new(SystemFs))
    }

    #[must_use]
    pub fn with_fs(root: PathBuf, fs: Arc<dyn FileSystemAdapter>) -> Self {
        Self { root, fs }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn rendering_dir(&self, id: &RenderingId) -> PathBuf {
        rendering_dir(&self.root, id)
    }

    #[must_use]
    pub fn exists(&self, id: &RenderingId) -> bool {
        self.fs.is_dir(&self.rendering_dir(id))
    }

    /// Writes all files for `id`.
    ///
    /// Files are staged in a scratch directory first. A fresh rendering becomes
    /// visible with one rename; an existing directory is kept and only the named
    /// files inside it are replaced.
    pub fn create(&self, id: &RenderingId, assets: &RenderingAssets) -> Result<(), StoreError> {
        let entries = assets.entries()?;
        let staging = staging_dir(&self.root, id);
        if self.fs.is_dir(&staging) {
            warn!(rendering = %id, "removing stale staging directory");
            self.fs.remove_dir_all(&staging)?;
        }
        self.fs.create_dir_all(&staging)?;
        if let Err(e) = self.stage(&staging, &entries) {
            if let Err(cleanup) = self.fs.remove_dir_all(&staging) {
                warn!(rendering = %id, error = %cleanup, "staging cleanup failed");
            }
            return Err(e);
        }

        let target = self.rendering_dir(id);
        if self.fs.is_dir(&target) {
            for (name, _) in &entries {
                self.fs.rename(&staging.join(name), &target.join(name))?;
            }
            self.fs.remove_dir_all(&staging)?;
        } else {
            self.fs.rename(&staging, &target)?;
        }
        info!(rendering = %id, files = entries.len(), "rendering assets written");
        Ok(())
    }

    /// Removes the directory tree of `id`. Returns whether anything was removed.
    pub fn destroy(&self, id: &RenderingId) -> Result<bool, StoreError> {
        match self.fs.remove_dir_all(&self.rendering_dir(id)) {
            Ok(()) => {
                info!(rendering = %id, "rendering assets removed");
                Ok(true)
            }
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Bytes of `relative_path` inside the directory of `id`.
    pub fn read(&self, id: &RenderingId, relative_path: &str) -> Result<Vec<u8>, StoreError> {
        let relative = confine_relative_path(relative_path)?;
        let dir = self.rendering_dir(id);
        if !self.fs.is_dir(&dir) {
            return Err(not_found(id, relative_path));
        }
        let candidate = dir.join(&relative);
        if !self.fs.is_file(&candidate) {
            return Err(not_found(id, relative_path));
        }
        let canonical_dir = self.fs.canonicalize(&dir)?;
        let canonical = self.fs.canonicalize(&candidate)?;
        if !canonical.starts_with(&canonical_dir) {
            return Err(StoreError::new(
                StoreErrorCode::InvalidPath,
                format!("asset path resolves outside rendering {id}: {relative_path}"),
            ));
        }
        self.fs.read(&canonical)
    }

    pub fn read_params(&self, id: &RenderingId) -> Result<RenderingParams, StoreError> {
        let raw = self.read(id, PARAMS_FILE)?;
        let params: RenderingParams = serde_json::from_slice(&raw).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Corrupt,
                format!("{PARAMS_FILE} of {id} is invalid: {e}"),
            )
        })?;
        params.validate()?;
        Ok(params)
    }

    fn stage(
        &self,
        staging: &Path,
        entries: &[(&'static str, Cow<'_, [u8]>)],
    ) -> Result<(), StoreError> {
        for (name, bytes) in entries {
            self.fs.write(&staging.join(name), bytes)?;
        }
        Ok(())
    }
}

fn not_found(id: &RenderingId, relative_path: &str) -> StoreError {
    StoreError::new(
        StoreErrorCode::NotFound,
        format!("asset {relative_path} not found for rendering {id}"),
    )
}
