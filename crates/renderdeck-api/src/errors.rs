// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidQueryParameter,
    ValidationFailed,
    InvalidRenderingId,
    InvalidAssetPath,
    RenderingNotFound,
    AssetNotFound,
    PayloadTooLarge,
    StoreFailure,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidQueryParameter => "invalid_query_parameter",
            Self::ValidationFailed => "validation_failed",
            Self::InvalidRenderingId => "invalid_rendering_id",
            Self::InvalidAssetPath => "invalid_asset_path",
            Self::RenderingNotFound => "rendering_not_found",
            Self::AssetNotFound => "asset_not_found",
            Self::PayloadTooLarge => "payload_too_large",
            Self::StoreFailure => "store_failure",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        code: ApiErrorCode,
        message: impl Into<String>,
        details: Value,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: request_id.into(),
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"field_errors":[{"parameter": name, "reason": "invalid", "value": value}]}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn validation_failed(field: &str, reason: &str) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "validation failed",
            json!({"field_errors":[{"field": field, "reason": reason}]}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn invalid_rendering_id(value: &str, reason: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidRenderingId,
            "invalid rendering id",
            json!({"id": value, "reason": reason}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn rendering_not_found(id: &str) -> Self {
        Self::new(
            ApiErrorCode::RenderingNotFound,
            "rendering not found",
            json!({"id": id}),
            "req-unknown",
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}
