// SPDX-License-Identifier: Apache-2.0

//! Store orchestration for the HTTP layer. Every filesystem touch runs on the
//! blocking pool and completes even if the client disconnects.

use crate::AppState;
use renderdeck_model::{move_rendering, MoveOutcome, RenderingId, RenderingParams};
use renderdeck_store::{RenderingAssets, StoreError, StoreErrorCode};
use tracing::{error, info};

async fn run_blocking<T, F>(f: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            StoreError::new(
                StoreErrorCode::Internal,
                format!("blocking task failed: {e}"),
            )
        })?
}

pub(crate) async fn list_renderings(state: &AppState) -> Result<Vec<RenderingId>, StoreError> {
    let store = state.store.clone();
    run_blocking(move || store.get_all()).await
}

/// Writes the asset directory, then appends the id to the index. A failed
/// append leaves the directory on disk.
pub(crate) async fn create_rendering(
    state: &AppState,
    id: RenderingId,
    upload: RenderingAssets,
) -> Result<(), StoreError> {
    let store = state.store.clone();
    let assets = state.assets.clone();
    run_blocking(move || {
        assets.create(&id, &upload)?;
        if let Err(err) = store.add(&id) {
            error!(
                rendering = %id,
                error = %err,
                "asset directory written but index append failed"
            );
            return Err(err);
        }
        info!(rendering = %id, "rendering created");
        Ok(())
    })
    .await
}

/// Destroys the asset directory before touching the index, so a failed
/// destroy keeps the rendering listed. Returns whether a directory existed.
pub(crate) async fn delete_rendering(
    state: &AppState,
    id: RenderingId,
) -> Result<bool, StoreError> {
    let store = state.store.clone();
    let assets = state.assets.clone();
    run_blocking(move || {
        let existed = assets.destroy(&id)?;
        if let Err(err) = store.remove(&id) {
            error!(
                rendering = %id,
                error = %err,
                "asset directory removed but index still lists it"
            );
            return Err(err);
        }
        info!(rendering = %id, existed, "rendering removed");
        Ok(existed)
    })
    .await
}

pub(crate) async fn reorder_renderings(
    state: &AppState,
    ids: Vec<RenderingId>,
) -> Result<(), StoreError> {
    let store = state.store.clone();
    run_blocking(move || {
        store.set_all(&ids)?;
        info!(count = ids.len(), "renderings reordered");
        Ok(())
    })
    .await
}

pub(crate) async fn move_rendering_in_index(
    state: &AppState,
    active: RenderingId,
    over: RenderingId,
) -> Result<MoveOutcome, StoreError> {
    let store = state.store.clone();
    run_blocking(move || store.update(|ids| move_rendering(ids, &active, &over))).await
}

pub(crate) async fn rendering_params(
    state: &AppState,
    id: RenderingId,
) -> Result<RenderingParams, StoreError> {
    let assets = state.assets.clone();
    run_blocking(move || {
        if !assets.exists(&id) {
            return Err(StoreError::new(
                StoreErrorCode::NotFound,
                format!("rendering {id} has no asset directory"),
            ));
        }
        assets.read_params(&id)
    })
    .await
}

pub(crate) async fn read_asset(
    state: &AppState,
    id: RenderingId,
    relative_path: String,
) -> Result<Vec<u8>, StoreError> {
    let assets = state.assets.clone();
    run_blocking(move || assets.read(&id, &relative_path)).await
}
