//! Engine configuration, loaded from TOML.
//!
//! Every section is optional; missing keys take their defaults. Unknown keys
//! are rejected so a typo does not silently fall back to a default.
//!
//! ```toml
//! [resolver]
//! snap_tolerance = 0.2
//!
//! [resolver.density]
//! samples = 32
//!
//! [style]
//! color = 0x3366ff
//! lineWidth = 2.0
//!
//! [drawing_plane]
//! normal = [0.0, 0.0, 1.0]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::feedback::FeedbackConfig;
use crate::geometry::PlaneConfig;
use crate::operations::StitchMethod;
use crate::path::PathStyle;
use crate::resolver::ResolverConfig;

/// Defaults applied by hosts when the user does not pick editing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditingDefaults {
    pub simplify_tolerance: f64,
    pub smooth_segments: usize,
    pub stitch_method: StitchMethod,
}

impl Default for EditingDefaults {
    fn default() -> Self {
        Self {
            simplify_tolerance: 0.1,
            smooth_segments: 50,
            stitch_method: StitchMethod::Shortest,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub resolver: ResolverConfig,
    /// Style of newly drawn paths.
    pub style: PathStyle,
    pub drawing_plane: PlaneConfig,
    pub editing: EditingDefaults,
    pub feedback: FeedbackConfig,
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys,
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.as_ref().display(), "loaded engine config");
        Ok(config)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolver.validate()?;
        self.drawing_plane.to_plane()?;

        self.style
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("style: {e}")))?;
        let tolerance = self.editing.simplify_tolerance;
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(ConfigError::Invalid(
                "editing.simplify_tolerance must be >= 0".into(),
            ));
        }
        if self.editing.smooth_segments == 0 {
            return Err(ConfigError::Invalid(
                "editing.smooth_segments must be >= 1".into(),
            ));
        }
        if self.feedback.frames == 0 {
            return Err(ConfigError::Invalid("feedback.frames must be >= 1".into()));
        }
        Ok(())
    }
}
