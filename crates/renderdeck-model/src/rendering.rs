// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const RENDERING_ID_MAX_LEN: usize = 128;

/// Opaque identifier of one rendering.
///
/// Doubles as the on-disk directory name, so the accepted alphabet is limited to
/// characters that always form a single plain path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct RenderingId(String);

impl RenderingId {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError("rendering id must not be empty".to_string()));
        }
        if s.len() > RENDERING_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "rendering id exceeds max length {RENDERING_ID_MAX_LEN}"
            )));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError(
                "rendering id must match [A-Za-z0-9_-]+".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    /// Fresh random identifier (UUID v4, hyphenated lowercase).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RenderingId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RenderingId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RenderingId> for String {
    fn from(value: RenderingId) -> Self {
        value.0
    }
}

impl AsRef<str> for RenderingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
