use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::{Point3, Vector3, TOLERANCE};

/// An infinite plane in 3D space, defined by a point on it and a unit normal.
///
/// Used as the fallback drawing surface when no point cloud is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    origin: Point3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from a coplanar point and a normal vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self, ConfigError> {
        let len = normal.norm();
        if !len.is_finite() || len < TOLERANCE {
            return Err(ConfigError::Invalid(
                "plane normal must be non-zero".into(),
            ));
        }
        Ok(Self {
            origin,
            normal: normal / len,
        })
    }

    /// The horizontal plane `y = height`.
    #[must_use]
    pub fn horizontal(height: f64) -> Self {
        Self {
            origin: Point3::new(0.0, height, 0.0),
            normal: Vector3::y(),
        }
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance from a point to the plane.
    /// Positive = on the normal side, negative = opposite.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin))
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::horizontal(0.0)
    }
}

/// Serializable description of the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaneConfig {
    pub normal: [f64; 3],
    pub point: [f64; 3],
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            normal: [0.0, 1.0, 0.0],
            point: [0.0, 0.0, 0.0],
        }
    }
}

impl PlaneConfig {
    /// Builds the plane this config describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured normal is zero-length.
    pub fn to_plane(&self) -> Result<Plane, ConfigError> {
        Plane::from_normal(Point3::from(self.point), Vector3::from(self.normal))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normal_is_normalized() {
        let plane = Plane::from_normal(Point3::origin(), Vector3::new(0.0, 0.0, 4.0)).unwrap();
        assert!((plane.normal().norm() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn zero_normal_is_rejected() {
        assert!(Plane::from_normal(Point3::origin(), Vector3::zeros()).is_err());
    }

    #[test]
    fn horizontal_plane_distance() {
        let plane = Plane::horizontal(2.0);
        assert!((plane.signed_distance(&Point3::new(5.0, 3.0, -1.0)) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn default_config_is_ground() {
        assert_eq!(PlaneConfig::default().to_plane().unwrap(), Plane::default());
    }
}
