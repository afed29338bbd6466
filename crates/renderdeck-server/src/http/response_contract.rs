// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use renderdeck_api::{ApiError, ApiErrorCode};
use renderdeck_store::{StoreError, StoreErrorCode};
use serde_json::json;
use tracing::error;

#[must_use]
pub(crate) fn status_for(code: ApiErrorCode) -> StatusCode {
    match code {
        ApiErrorCode::InvalidQueryParameter
        | ApiErrorCode::ValidationFailed
        | ApiErrorCode::InvalidRenderingId
        | ApiErrorCode::InvalidAssetPath => StatusCode::BAD_REQUEST,
        ApiErrorCode::RenderingNotFound | ApiErrorCode::AssetNotFound => StatusCode::NOT_FOUND,
        ApiErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = status_for(err.code);
    (status, Json(json!({"error": err}))).into_response()
}

/// `not_found` picks between a missing rendering and a missing asset, which the
/// store reports with the same code.
#[must_use]
pub(crate) fn store_error_to_api(
    err: &StoreError,
    not_found: ApiErrorCode,
    request_id: &str,
) -> ApiError {
    let (code, message) = match err.code {
        StoreErrorCode::NotFound => (not_found, "not found".to_string()),
        StoreErrorCode::Validation => (ApiErrorCode::ValidationFailed, err.message.clone()),
        StoreErrorCode::InvalidPath => (ApiErrorCode::InvalidAssetPath, err.message.clone()),
        StoreErrorCode::Io | StoreErrorCode::Corrupt => {
            (ApiErrorCode::StoreFailure, "store failure".to_string())
        }
        _ => (ApiErrorCode::Internal, "internal error".to_string()),
    };
    ApiError::new(
        code,
        message,
        json!({"store_code": err.code.as_str()}),
        request_id,
    )
}

pub(crate) fn store_error_response(
    err: &StoreError,
    not_found: ApiErrorCode,
    request_id: &str,
) -> Response {
    let api = store_error_to_api(err, not_found, request_id);
    if status_for(api.code).is_server_error() {
        error!(code = err.code.as_str(), error = %err, "store operation failed");
    }
    api_error_response(api)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_client_error_code_maps_to_a_4xx() {
        for (code, status) in [
            (ApiErrorCode::InvalidQueryParameter, 400),
            (ApiErrorCode::ValidationFailed, 400),
            (ApiErrorCode::InvalidRenderingId, 400),
            (ApiErrorCode::InvalidAssetPath, 400),
            (ApiErrorCode::RenderingNotFound, 404),
            (ApiErrorCode::AssetNotFound, 404),
            (ApiErrorCode::PayloadTooLarge, 413),
            (ApiErrorCode::StoreFailure, 500),
            (ApiErrorCode::Internal, 500),
        ] {
            assert_eq!(status_for(code).as_u16(), status, "{}", code.as_str());
        }
    }

    #[test]
    fn store_failures_hide_filesystem_details() {
        let err = StoreError::new(StoreErrorCode::Io, "/srv/data/renderings.json: denied");
        let api = store_error_to_api(&err, ApiErrorCode::RenderingNotFound, "req-1");
        assert_eq!(api.code, ApiErrorCode::StoreFailure);
        assert!(!api.message.contains("/srv"));
        assert_eq!(api.details["store_code"], "io_error");
        assert_eq!(api.request_id, "req-1");
    }

    #[test]
    fn not_found_takes_the_callers_code() {
        let err = StoreError::new(StoreErrorCode::NotFound, "gone");
        let api = store_error_to_api(&err, ApiErrorCode::AssetNotFound, "req-2");
        assert_eq!(api.code, ApiErrorCode::AssetNotFound);
        let err = StoreError::new(StoreErrorCode::InvalidPath, "escapes");
        let api = store_error_to_api(&err, ApiErrorCode::AssetNotFound, "req-2");
        assert_eq!(api.code, ApiErrorCode::InvalidAssetPath);
    }
}
