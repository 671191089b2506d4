use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Stroke pattern of a path's connecting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Visual style of a path. A closed set of fields; partial updates go through
/// [`StyleOverride`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PathStyle {
    /// `0xRRGGBB`.
    pub color: u32,
    pub line_width: f64,
    pub opacity: f64,
    #[serde(rename = "type")]
    pub line_type: LineType,
    /// Radius of the per-point marker spheres.
    #[serde(rename = "pointSize")]
    pub marker_size: f64,
    #[serde(rename = "showPoints")]
    pub show_markers: bool,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: 0x00ff_4444,
            line_width: 3.0,
            opacity: 1.0,
            line_type: LineType::Solid,
            marker_size: 0.05,
            show_markers: true,
        }
    }
}

impl PathStyle {
    /// Returns a copy with every field present in `overrides` replaced.
    #[must_use]
    pub fn merged(&self, overrides: &StyleOverride) -> Self {
        Self {
            color: overrides.color.unwrap_or(self.color),
            line_width: overrides.line_width.unwrap_or(self.line_width),
            opacity: overrides.opacity.unwrap_or(self.opacity),
            line_type: overrides.line_type.unwrap_or(self.line_type),
            marker_size: overrides.marker_size.unwrap_or(self.marker_size),
            show_markers: overrides.show_markers.unwrap_or(self.show_markers),
        }
    }

    /// Checks that opacity lies in `[0, 1]` and that widths are non-negative.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidParameter`] describing the offending field.
    pub fn validate(&self) -> Result<(), EditError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(EditError::InvalidParameter(format!(
                "opacity {} is outside [0, 1]",
                self.opacity
            )));
        }
        if !(self.line_width >= 0.0 && self.marker_size >= 0.0) {
            return Err(EditError::InvalidParameter(
                "line width and marker size must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Field-by-field partial style. Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct StyleOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub line_type: Option<LineType>,
    #[serde(rename = "pointSize", skip_serializing_if = "Option::is_none")]
    pub marker_size: Option<f64>,
    #[serde(rename = "showPoints", skip_serializing_if = "Option::is_none")]
    pub show_markers: Option<bool>,
}
