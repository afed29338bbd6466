// SPDX-License-Identifier: Apache-2.0

use crate::{StoreError, StoreErrorCode};
use renderdeck_model::{RenderingId, INDEX_FILE, RENDERINGS_DIR};
use std::path::{Component, Path, PathBuf};

pub const STAGING_DIR: &str = ".staging";

#[must_use]
pub fn index_path(data_root: &Path) -> PathBuf {
    data_root.join(INDEX_FILE)
}

#[must_use]
pub fn asset_root(data_root: &Path) -> PathBuf {
    data_root.join(RENDERINGS_DIR)
}

#[must_use]
pub fn rendering_dir(asset_root: &Path, id: &RenderingId) -> PathBuf {
    asset_root.join(id.as_str())
}

#[must_use]
pub fn staging_dir(asset_root: &Path, id: &RenderingId) -> PathBuf {
    asset_root.join(STAGING_DIR).join(id.as_str())
}

/// Lexically validates a caller-supplied sub-path of a rendering directory.
///
/// Only plain components survive; `.` segments are dropped. Anything that could
/// climb out of the directory (`..`, absolute roots, drive prefixes) is rejected.
pub fn confine_relative_path(raw: &str) -> Result<PathBuf, StoreError> {
    let mut out = PathBuf::new();
    for component in Path::new(raw).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(StoreError::new(
                    StoreErrorCode::InvalidPath,
                    format!("asset path escapes rendering directory: {raw}"),
                ));
            }
        }
    }
    if out.as_os_str().is_empty() {
        return Err(StoreError::new(
            StoreErrorCode::InvalidPath,
            "asset path must not be empty",
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_nested_plain_paths() {
        assert_eq!(
            confine_relative_path("thumbnail.jpg").expect("plain"),
            PathBuf::from("thumbnail.jpg")
        );
        assert_eq!(
            confine_relative_path("./sub/./file.bin").expect("nested"),
            PathBuf::from("sub/file.bin")
        );
    }

    #[test]
    fn rejects_escapes_and_empty_paths() {
        for bad in ["", ".", "../x", "a/../../x", "/etc/passwd", "a/.."] {
            let err = confine_relative_path(bad).expect_err(bad);
            assert_eq!(err.code, StoreErrorCode::InvalidPath, "{bad:?}");
        }
    }

    #[test]
    fn staging_lives_outside_valid_id_namespace() {
        let root = Path::new("/data/renderings");
        let id = RenderingId::parse("abc").expect("id");
        assert_eq!(rendering_dir(root, &id), root.join("abc"));
        assert_eq!(staging_dir(root, &id), root.join(".staging/abc"));
        assert!(RenderingId::parse(STAGING_DIR).is_err());
    }
}
