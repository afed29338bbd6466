// SPDX-License-Identifier: Apache-2.0

use renderdeck_server::{
    build_router, validate_startup_config, AppState, ServerConfig, DEFAULT_MAX_REPEAT,
    DEFAULT_MAX_UPLOAD_BYTES,
};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn config_from_env() -> ServerConfig {
    let defaults = ServerConfig::default();
    ServerConfig {
        bind_addr: env::var("RENDERDECK_BIND").unwrap_or(defaults.bind_addr),
        data_root: env::var("RENDERDECK_DATA_ROOT")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_root),
        public_origin: env::var("RENDERDECK_PUBLIC_ORIGIN")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()),
        max_upload_bytes: env_usize("RENDERDECK_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        max_repeat: env_usize("RENDERDECK_MAX_REPEAT", DEFAULT_MAX_REPEAT),
        asset_cache_ttl: Duration::from_secs(env_u64(
            "RENDERDECK_ASSET_CACHE_SECS",
            defaults.asset_cache_ttl.as_secs(),
        )),
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                _ => {
                    error!("failed to register signal handlers; falling back to ctrl-c");
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("RENDERDECK_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let config = config_from_env();
    validate_startup_config(&config).map_err(|e| format!("invalid configuration: {e}"))?;

    let bind_addr = config.bind_addr.clone();
    info!(
        data_root = %config.data_root.display(),
        public_origin = config.public_origin.as_deref().unwrap_or(""),
        max_upload_bytes = config.max_upload_bytes,
        "renderdeck configuration loaded"
    );
    let state = AppState::new(config);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("renderdeck-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
