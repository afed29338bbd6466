// SPDX-License-Identifier: Apache-2.0

use crate::http::request_tracing::RequestTrace;
use crate::http::response_contract::{api_error_response, store_error_response};
use crate::{services, AppState};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use renderdeck_api::{Alert, ApiError, ApiErrorCode, MutationAckDto};
use renderdeck_model::{AssetFile, RenderingId, RenderingParams, PARAM_FIELDS};
use renderdeck_store::RenderingAssets;
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;

/// Raw multipart fields; text fields are kept as strings until the whole
/// form has been read.
#[derive(Default)]
struct UploadForm {
    files: Vec<(AssetFile, Vec<u8>)>,
    text: HashMap<String, String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };
            if let Some(file) = AssetFile::from_field_name(&name) {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.files.retain(|(existing, _)| *existing != file);
                form.files.push((file, bytes.to_vec()));
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                form.text.insert(name, value);
            }
        }
        Ok(form)
    }

    fn take_file(&mut self, file: AssetFile) -> Result<Vec<u8>, ApiError> {
        let pos = self
            .files
            .iter()
            .position(|(existing, _)| *existing == file)
            .ok_or_else(|| ApiError::validation_failed(file.field_name(), "missing file"))?;
        Ok(self.files.swap_remove(pos).1)
    }

    fn into_assets(mut self) -> Result<RenderingAssets, ApiError> {
        let params = RenderingParams::from_fields(|name| self.text.get(name).map(String::as_str))
            .map_err(|e| ApiError::validation_failed("params", &e.0))?;
        for key in self.text.keys().filter(|k| !PARAM_FIELDS.contains(&k.as_str())) {
            debug!(field = %key, "ignoring unknown upload field");
        }
        Ok(RenderingAssets {
            thumbnail: self.take_file(AssetFile::Thumbnail)?,
            cameras: self.take_file(AssetFile::Cameras)?,
            images: self.take_file(AssetFile::Images)?,
            bundle: self.take_file(AssetFile::Bundle)?,
            params,
        })
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    multipart_failure(err.status(), err.body_text())
}

fn multipart_failure(status: StatusCode, reason: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(
            ApiErrorCode::PayloadTooLarge,
            "upload too large",
            json!({"reason": reason}),
            "req-unknown",
        );
    }
    ApiError::validation_failed("multipart", &reason)
}

pub(crate) async fn create_rendering_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let id = RenderingId::generate();
    let multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            let err = multipart_failure(rejection.status(), rejection.body_text());
            return api_error_response(err.with_request_id(&trace.request_id));
        }
    };
    let upload = match UploadForm::read(multipart)
        .await
        .and_then(UploadForm::into_assets)
    {
        Ok(upload) => upload,
        Err(err) => return api_error_response(err.with_request_id(&trace.request_id)),
    };

    if let Err(err) = services::create_rendering(&state, id.clone(), upload).await {
        return store_error_response(&err, ApiErrorCode::Internal, &trace.request_id);
    }

    let mut response = (
        StatusCode::CREATED,
        Json(MutationAckDto::for_rendering(Alert::Created, id.clone())),
    )
        .into_response();
    if let Ok(location) = HeaderValue::from_str(&format!("/renderings/{id}")) {
        response.headers_mut().insert(header::LOCATION, location);
    }
    response
}
