// SPDX-License-Identifier: Apache-2.0

use crate::ValidationError;
use serde::{Deserialize, Serialize};

pub const PARAM_FIELDS: [&str; 4] = ["depthCorrectionFactor", "scaleX", "scaleY", "scaleZ"];

/// Numeric calibration parameters stored as `params.json`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RenderingParams {
    pub depth_correction_factor: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub scale_z: f64,
}

impl RenderingParams {
    /// Builds the record from raw form values, looked up by their wire names.
    pub fn from_fields<'a, F>(mut lookup: F) -> Result<Self, ValidationError>
    where
        F: FnMut(&str) -> Option<&'a str>,
    {
        let mut values = [0.0_f64; 4];
        for (slot, name) in values.iter_mut().zip(PARAM_FIELDS) {
            let raw = lookup(name)
                .ok_or_else(|| ValidationError(format!("missing parameter: {name}")))?;
            *slot = parse_param_value(name, raw)?;
        }
        let [depth_correction_factor, scale_x, scale_y, scale_z] = values;
        Ok(Self {
            depth_correction_factor,
            scale_x,
            scale_y,
            scale_z,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let pairs = [
            (PARAM_FIELDS[0], self.depth_correction_factor),
            (PARAM_FIELDS[1], self.scale_x),
            (PARAM_FIELDS[2], self.scale_y),
            (PARAM_FIELDS[3], self.scale_z),
        ];
        for (name, value) in pairs {
            if !value.is_finite() {
                return Err(ValidationError(format!("parameter {name} must be finite")));
            }
        }
        Ok(())
    }
}

pub fn parse_param_value(name: &str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError(format!("parameter {name} must be numeric, got {trimmed:?}")))?;
    if !value.is_finite() {
        return Err(ValidationError(format!("parameter {name} must be finite")));
    }
    Ok(value)
}
