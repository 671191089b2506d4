use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Minimum number of depth samples taken by the density heuristic.
pub const MIN_DENSITY_SAMPLES: usize = 20;

/// Tuning of the depth-density heuristic used when a pointer ray does not
/// pick a single cloud sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DensityParams {
    /// Evenly spaced depths probed between the camera's near and far planes.
    /// At least [`MIN_DENSITY_SAMPLES`].
    pub samples: usize,
    /// Neighbourhood radius counted around each probed depth.
    pub radius: f64,
    /// Where along `[near, far]` the last-resort guess is placed.
    pub fallback_depth_fraction: f64,
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            samples: MIN_DENSITY_SAMPLES,
            radius: 0.1,
            fallback_depth_fraction: 0.1,
        }
    }
}

impl DensityParams {
    /// Effective sample count, never below [`MIN_DENSITY_SAMPLES`] even for
    /// params that skipped validation.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.max(MIN_DENSITY_SAMPLES)
    }
}

/// Resolver settings. Passed explicitly into every resolve call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Maximum distance from the raw intersection to a snap candidate.
    pub snap_tolerance: f64,
    pub snap_enabled: bool,
    /// Radius of the snap feedback marker.
    pub marker_size: f64,
    /// `0xRRGGBB` of the snap feedback marker.
    pub marker_color: u32,
    /// Maximum sample-to-ray distance for a sample to count as hit.
    pub pick_radius: f64,
    /// A denser snap candidate wins over the nearest one only while its
    /// distance is within this multiple of the nearest distance.
    pub density_tolerance_ratio: f64,
    pub density: DensityParams,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: 0.1,
            snap_enabled: true,
            marker_size: 0.05,
            marker_color: 0x0000_ff88,
            pick_radius: 0.05,
            density_tolerance_ratio: 1.5,
            density: DensityParams::default(),
        }
    }
}

impl ResolverConfig {
    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (
                self.snap_tolerance.is_finite() && self.snap_tolerance >= 0.0,
                "snap_tolerance must be >= 0",
            ),
            (
                self.marker_size.is_finite() && self.marker_size > 0.0,
                "marker_size must be > 0",
            ),
            (
                self.pick_radius.is_finite() && self.pick_radius > 0.0,
                "pick_radius must be > 0",
            ),
            (
                self.density_tolerance_ratio >= 1.0,
                "density_tolerance_ratio must be >= 1",
            ),
            (
                self.density.samples >= MIN_DENSITY_SAMPLES,
                "density.samples must be >= 20",
            ),
            (
                self.density.radius.is_finite() && self.density.radius > 0.0,
                "density.radius must be > 0",
            ),
            (
                self.density.fallback_depth_fraction > 0.0
                    && self.density.fallback_depth_fraction <= 1.0,
                "density.fallback_depth_fraction must be in (0, 1]",
            ),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, msg)) => Err(ConfigError::Invalid((*msg).to_owned())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ResolverConfig::default().validate().is_ok());
    }

    #[test]
    fn sample_count_has_floor() {
        let params = DensityParams {
            samples: 5,
            ..DensityParams::default()
        };
        assert_eq!(params.sample_count(), MIN_DENSITY_SAMPLES);
    }

    #[test]
    fn too_few_density_samples_are_invalid() {
        let mut config = ResolverConfig::default();
        config.density.samples = MIN_DENSITY_SAMPLES - 1;
        assert!(config.validate().is_err());
        config.density.samples = MIN_DENSITY_SAMPLES;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_tolerance_is_invalid() {
        let config = ResolverConfig {
            snap_tolerance: -0.5,
            ..ResolverConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
