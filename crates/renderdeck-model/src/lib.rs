// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod index;
mod layout;
mod params;
mod rendering;

pub use index::{move_rendering, MoveOutcome};
pub use layout::{
    additional_information, AssetFile, ADDITIONAL_INFORMATION_FILE, BUNDLE_FILE, CAMERAS_FILE,
    IMAGES_FILE, INDEX_FILE, PARAMS_FILE, RENDERINGS_DIR, THUMBNAIL_FILE,
};
pub use params::{parse_param_value, RenderingParams, PARAM_FIELDS};
pub use rendering::{RenderingId, ValidationError, RENDERING_ID_MAX_LEN};
