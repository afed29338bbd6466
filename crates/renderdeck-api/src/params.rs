// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use renderdeck_model::RenderingId;
use std::collections::BTreeMap;

pub const DEFAULT_REPEAT: usize = 1;

/// `repeat` query parameter of the public listing: absent means 1, `0` is allowed
/// and yields an empty listing.
pub fn parse_repeat(
    query: &BTreeMap<String, String>,
    max_repeat: usize,
) -> Result<usize, ApiError> {
    let Some(raw) = query.get("repeat") else {
        return Ok(DEFAULT_REPEAT);
    };
    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| ApiError::invalid_param("repeat", raw))?;
    if value > max_repeat {
        return Err(ApiError::invalid_param("repeat", raw));
    }
    Ok(value)
}

pub fn parse_rendering_id_param(raw: &str) -> Result<RenderingId, ApiError> {
    RenderingId::parse(raw).map_err(|e| ApiError::invalid_rendering_id(raw, &e.0))
}

/// Public URL of a rendering directory. Without an origin the URL is
/// root-relative.
#[must_use]
pub fn rendering_url(origin: Option<&str>, id: &RenderingId) -> String {
    let origin = origin.map(|o| o.trim_end_matches('/')).unwrap_or("");
    format!("{origin}/renderings/{id}/")
}

/// The whole listing repeated `repeat` times back to back.
#[must_use]
pub fn repeat_listing(items: &[String], repeat: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(items.len().saturating_mul(repeat));
    for _ in 0..repeat {
        out.extend_from_slice(items);
    }
    out
}
