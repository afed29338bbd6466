// SPDX-License-Identifier: Apache-2.0

pub const INDEX_FILE: &str = "renderings.json";
pub const RENDERINGS_DIR: &str = "renderings";

pub const THUMBNAIL_FILE: &str = "thumbnail.jpg";
pub const CAMERAS_FILE: &str = "cameras.txt";
pub const IMAGES_FILE: &str = "images.txt";
pub const BUNDLE_FILE: &str = "bundlename";
pub const PARAMS_FILE: &str = "params.json";
pub const ADDITIONAL_INFORMATION_FILE: &str = "additional_information.txt";

const ADDITIONAL_INFORMATION: &str = "# Additional setup information:
#   INITIAL_VIEWING_POSITION
0 0 0
#   Distance ranges with one line of data per camera:
#   CAMERA_ID DISTANCE_RANGE_MIN DISTANCE_RANGE_MAX
1 0.3 1000";

/// Uploaded files of a rendering, keyed by their multipart field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetFile {
    Thumbnail,
    Cameras,
    Images,
    Bundle,
}

impl AssetFile {
    pub const ALL: [Self; 4] = [Self::Thumbnail, Self::Cameras, Self::Images, Self::Bundle];

    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Cameras => "cameras",
            Self::Images => "images",
            Self::Bundle => "bundle",
        }
    }

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Thumbnail => THUMBNAIL_FILE,
            Self::Cameras => CAMERAS_FILE,
            Self::Images => IMAGES_FILE,
            Self::Bundle => BUNDLE_FILE,
        }
    }

    #[must_use]
    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.field_name() == name)
    }
}

/// Fixed setup file written next to every rendering.
#[must_use]
pub const fn additional_information() -> &'static str {
    ADDITIONAL_INFORMATION
}
