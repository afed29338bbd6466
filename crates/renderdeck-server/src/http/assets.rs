// SPDX-License-Identifier: Apache-2.0

use crate::http::request_tracing::RequestTrace;
use crate::http::response_contract::{api_error_response, store_error_response};
use crate::{services, AppState};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use renderdeck_api::{parse_rendering_id_param, ApiErrorCode};
use sha2::{Digest, Sha256};
use std::time::Duration;

#[must_use]
pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

#[must_use]
pub(crate) fn content_type_for(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

pub(crate) fn if_none_match(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

pub(crate) fn put_cache_headers(headers: &mut HeaderMap, ttl: Duration, etag: &str) {
    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", ttl.as_secs())) {
        headers.insert(header::CACHE_CONTROL, value);
    }
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert(header::ETAG, value);
    }
}

fn etag_matches(candidates: &str, etag: &str) -> bool {
    candidates
        .split(',')
        .map(str::trim)
        .any(|c| c == "*" || c == etag || c.strip_prefix("W/") == Some(etag))
}

pub(crate) async fn read_asset_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Path((raw_id, path)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let id = match parse_rendering_id_param(&raw_id) {
        Ok(id) => id,
        Err(err) => return api_error_response(err.with_request_id(&trace.request_id)),
    };
    let relative = path.trim_start_matches('/').to_string();
    let content_type = content_type_for(&relative);
    let bytes = match services::read_asset(&state, id, relative).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return store_error_response(&err, ApiErrorCode::AssetNotFound, &trace.request_id)
        }
    };

    let etag = format!("\"{}\"", sha256_hex(&bytes));
    let ttl = state.config.asset_cache_ttl;
    if if_none_match(&headers).is_some_and(|v| etag_matches(&v, &etag)) {
        let mut response = StatusCode::NOT_MODIFIED.into_response();
        put_cache_headers(response.headers_mut(), ttl, &etag);
        return response;
    }
    let mut response = bytes.into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    put_cache_headers(response.headers_mut(), ttl, &etag);
    response
}
