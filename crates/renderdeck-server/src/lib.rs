// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use renderdeck_store::{AssetDirectory, RenderingStore};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod config;
mod http;
mod middleware;
mod services;

pub use config::{
    validate_startup_config, ServerConfig, CONFIG_SCHEMA_VERSION, DEFAULT_MAX_REPEAT,
    DEFAULT_MAX_UPLOAD_BYTES,
};

pub const CRATE_NAME: &str = "renderdeck-server";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<RenderingStore>,
    pub assets: Arc<AssetDirectory>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    /// State backed by the real filesystem under `config.data_root`.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let store = RenderingStore::new(config.index_path());
        let assets = AssetDirectory::new(config.asset_root());
        Self::with_parts(config, Arc::new(store), Arc::new(assets))
    }

    #[must_use]
    pub fn with_parts(
        config: ServerConfig,
        store: Arc<RenderingStore>,
        assets: Arc<AssetDirectory>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            assets,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/v1/version", get(http::handlers::version_handler))
        .route("/v1/openapi.json", get(http::handlers::openapi_handler))
        .route(
            "/api/renderings",
            get(http::handlers::public_renderings_handler),
        )
        .route(
            "/renderings",
            get(http::handlers::list_renderings_handler)
                .post(http::upload::create_rendering_handler)
                .put(http::handlers::reorder_renderings_handler),
        )
        .route(
            "/renderings/move",
            post(http::handlers::move_rendering_handler),
        )
        .route(
            "/renderings/:id",
            get(http::handlers::rendering_detail_handler)
                .delete(http::handlers::delete_rendering_handler),
        )
        .route(
            "/renderings/:id/*path",
            get(http::assets::read_asset_handler),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}
