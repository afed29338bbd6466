// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod assets;
mod error;
pub mod fs;
mod index;
pub mod paths;

pub use assets::{AssetDirectory, RenderingAssets};
pub use error::{StoreError, StoreErrorCode};
pub use fs::{FileSystemAdapter, SystemFs};
pub use index::RenderingStore;
pub use paths::{asset_root, confine_relative_path, index_path};
