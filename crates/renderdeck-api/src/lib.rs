// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod dto;
mod errors;
mod openapi;
pub mod params;

pub use dto::{
    Alert, MoveRequestDto, MutationAckDto, RenderingDetailDto, RenderingListDto, RenderingUrlsDto,
};
pub use errors::{ApiError, ApiErrorCode};
pub use openapi::openapi_v1_spec;
pub use params::{parse_rendering_id_param, parse_repeat, rendering_url, repeat_listing};
