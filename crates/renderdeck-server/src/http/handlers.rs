// SPDX-License-Identifier: Apache-2.0

use crate::http::request_tracing::RequestTrace;
use crate::http::response_contract::{api_error_response, store_error_response};
use crate::{services, AppState, CONFIG_SCHEMA_VERSION, CRATE_NAME};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use renderdeck_api::{
    openapi_v1_spec, parse_rendering_id_param, parse_repeat, rendering_url, repeat_listing,
    Alert, ApiError, ApiErrorCode, MoveRequestDto, MutationAckDto, RenderingDetailDto,
    RenderingListDto, RenderingUrlsDto,
};
use renderdeck_model::{MoveOutcome, THUMBNAIL_FILE};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::info;

pub(crate) async fn healthz_handler() -> &'static str {
    "ok"
}

pub(crate) async fn version_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": CRATE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "config_schema_version": CONFIG_SCHEMA_VERSION,
    }))
}

pub(crate) async fn openapi_handler() -> Json<serde_json::Value> {
    Json(openapi_v1_spec())
}

pub(crate) async fn public_renderings_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let repeat = match parse_repeat(&query, state.config.max_repeat) {
        Ok(v) => v,
        Err(err) => return api_error_response(err.with_request_id(&trace.request_id)),
    };
    let ids = match services::list_renderings(&state).await {
        Ok(ids) => ids,
        Err(err) => {
            return store_error_response(&err, ApiErrorCode::Internal, &trace.request_id)
        }
    };
    let origin = state.config.public_origin.as_deref();
    let urls: Vec<String> = ids.iter().map(|id| rendering_url(origin, id)).collect();
    Json(RenderingUrlsDto {
        renderings: repeat_listing(&urls, repeat),
    })
    .into_response()
}

pub(crate) async fn list_renderings_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
) -> Response {
    match services::list_renderings(&state).await {
        Ok(renderings) => Json(RenderingListDto { renderings }).into_response(),
        Err(err) => store_error_response(&err, ApiErrorCode::Internal, &trace.request_id),
    }
}

pub(crate) async fn reorder_renderings_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    body: Result<Json<RenderingListDto>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejection_response(&rejection, &trace),
    };
    match services::reorder_renderings(&state, body.renderings).await {
        Ok(()) => Json(MutationAckDto::new(Alert::Sorted)).into_response(),
        Err(err) => store_error_response(&err, ApiErrorCode::Internal, &trace.request_id),
    }
}

pub(crate) async fn move_rendering_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    body: Result<Json<MoveRequestDto>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejection_response(&rejection, &trace),
    };
    match services::move_rendering_in_index(&state, body.active, body.over).await {
        Ok(MoveOutcome::NotFound(id)) => api_error_response(
            ApiError::rendering_not_found(id.as_str()).with_request_id(&trace.request_id),
        ),
        Ok(outcome) => {
            if let MoveOutcome::Moved { from, to } = outcome {
                info!(from, to, "rendering moved");
            }
            Json(MutationAckDto::new(Alert::Sorted)).into_response()
        }
        Err(err) => store_error_response(&err, ApiErrorCode::Internal, &trace.request_id),
    }
}

pub(crate) async fn rendering_detail_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_rendering_id_param(&raw_id) {
        Ok(id) => id,
        Err(err) => return api_error_response(err.with_request_id(&trace.request_id)),
    };
    match services::rendering_params(&state, id.clone()).await {
        Ok(params) => {
            let thumbnail = format!("{}{THUMBNAIL_FILE}", rendering_url(None, &id));
            Json(RenderingDetailDto {
                id,
                params,
                thumbnail,
            })
            .into_response()
        }
        Err(err) if err.is_not_found() => api_error_response(
            ApiError::rendering_not_found(id.as_str()).with_request_id(&trace.request_id),
        ),
        Err(err) => {
            store_error_response(&err, ApiErrorCode::RenderingNotFound, &trace.request_id)
        }
    }
}

pub(crate) async fn delete_rendering_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_rendering_id_param(&raw_id) {
        Ok(id) => id,
        Err(err) => return api_error_response(err.with_request_id(&trace.request_id)),
    };
    match services::delete_rendering(&state, id).await {
        Ok(_) => Json(MutationAckDto::new(Alert::Removed)).into_response(),
        Err(err) => store_error_response(&err, ApiErrorCode::Internal, &trace.request_id),
    }
}

fn body_rejection_response(rejection: &JsonRejection, trace: &RequestTrace) -> Response {
    let code = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiErrorCode::PayloadTooLarge
    } else {
        ApiErrorCode::ValidationFailed
    };
    api_error_response(ApiError::new(
        code,
        "invalid request body",
        json!({"reason": rejection.body_text()}),
        &trace.request_id,
    ))
}
