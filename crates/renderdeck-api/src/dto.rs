// SPDX-License-Identifier: Apache-2.0

use renderdeck_model::{RenderingId, RenderingParams};
use serde::{Deserialize, Serialize};

/// Ordered identifiers; used both as the listing response and as the reorder body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderingListDto {
    pub renderings: Vec<RenderingId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderingUrlsDto {
    pub renderings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoveRequestDto {
    pub active: RenderingId,
    pub over: RenderingId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    Created,
    Removed,
    Sorted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MutationAckDto {
    pub alert: Alert,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RenderingId>,
}

impl MutationAckDto {
    #[must_use]
    pub fn new(alert: Alert) -> Self {
        Self { alert, id: None }
    }

    #[must_use]
    pub fn for_rendering(alert: Alert, id: RenderingId) -> Self {
        Self {
            alert,
            id: Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderingDetailDto {
    pub id: RenderingId,
    pub params: RenderingParams,
    pub thumbnail: String,
}
