// SPDX-License-Identifier: Apache-2.0

mod api_support;

use api_support::{config_for, full_upload, get, send_raw, spawn_app, upload};
use renderdeck_server::AppState;
use renderdeck_store::{
    AssetDirectory, FileSystemAdapter, RenderingStore, StoreError, StoreErrorCode, SystemFs,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

/// Delegates to the real filesystem until `fail_removals` is flipped.
#[derive(Default)]
struct FlakyRemovals {
    fail_removals: AtomicBool,
}

impl FileSystemAdapter for FlakyRemovals {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        SystemFs.read(path)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        SystemFs.write(path, bytes)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), StoreError> {
        SystemFs.create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), StoreError> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(StoreError::new(StoreErrorCode::Io, "permission denied"));
        }
        SystemFs.remove_dir_all(path)
    }

    fn rename(&self, src: &Path, dst: &Path) -> Result<(), StoreError> {
        SystemFs.rename(src, dst)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf, StoreError> {
        SystemFs.canonicalize(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        SystemFs.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        SystemFs.is_file(path)
    }
}

#[tokio::test]
async fn failed_directory_removal_keeps_rendering_indexed() {
    let tmp = tempdir().expect("tempdir");
    let config = config_for(tmp.path());
    let fs = Arc::new(FlakyRemovals::default());
    let store = Arc::new(RenderingStore::new(config.index_path()));
    let assets = Arc::new(AssetDirectory::with_fs(config.asset_root(), fs.clone()));
    let addr = spawn_app(AppState::with_parts(config, store, assets)).await;

    let created = upload(addr, &full_upload(&[])).await;
    assert_eq!(created.status, 201);
    let id = created.json()["id"].as_str().expect("id").to_string();

    fs.fail_removals.store(true, Ordering::SeqCst);
    let resp = send_raw(addr, "DELETE", &format!("/renderings/{id}"), &[], b"").await;
    assert_eq!(resp.status, 500);
    let err = &resp.json()["error"];
    assert_eq!(err["code"], "store_failure");
    assert!(!err["message"].as_str().expect("message").contains("permission"));

    assert_eq!(
        get(addr, "/renderings").await.json(),
        serde_json::json!({"renderings": [id.clone()]})
    );
    assert!(tmp.path().join("renderings").join(&id).is_dir());

    fs.fail_removals.store(false, Ordering::SeqCst);
    let resp = send_raw(addr, "DELETE", &format!("/renderings/{id}"), &[], b"").await;
    assert_eq!(resp.status, 200);
    assert_eq!(
        get(addr, "/renderings").await.json(),
        serde_json::json!({"renderings": []})
    );
}
