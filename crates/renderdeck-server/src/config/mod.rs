// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;
pub const DEFAULT_MAX_REPEAT: usize = 1000;
/// Upper bound for `max_repeat`; one listing response never exceeds this many copies.
pub const MAX_REPEAT_LIMIT: usize = 100_000;

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub data_root: PathBuf,
    /// Scheme and host prefixed to public listing URLs, e.g. `https://decks.example.org`.
    pub public_origin: Option<String>,
    pub max_upload_bytes: usize,
    pub max_repeat: usize,
    pub asset_cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            data_root: PathBuf::from("data"),
            public_origin: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_repeat: DEFAULT_MAX_REPEAT,
            asset_cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        renderdeck_store::index_path(&self.data_root)
    }

    #[must_use]
    pub fn asset_root(&self) -> PathBuf {
        renderdeck_store::asset_root(&self.data_root)
    }
}

pub fn validate_startup_config(cfg: &ServerConfig) -> Result<(), String> {
    cfg.bind_addr
        .parse::<SocketAddr>()
        .map_err(|e| format!("invalid bind address {:?}: {e}", cfg.bind_addr))?;
    if cfg.data_root.as_os_str().is_empty() {
        return Err("data root must not be empty".to_string());
    }
    if cfg.max_upload_bytes == 0 {
        return Err("max upload bytes must be > 0".to_string());
    }
    if cfg.max_repeat > MAX_REPEAT_LIMIT {
        return Err(format!(
            "max repeat must be <= {MAX_REPEAT_LIMIT}, got {}",
            cfg.max_repeat
        ));
    }
    if let Some(origin) = cfg.public_origin.as_deref() {
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(format!(
                "public origin must start with http:// or https://, got {origin:?}"
            ));
        }
    }
    Ok(())
}
