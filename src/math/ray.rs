use crate::error::ResolveError;

use super::{Point3, Vector3, TOLERANCE};

/// A half-line `P(t) = origin + t * direction`, `t >= 0`, with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::DegenerateCamera`] if `direction` is zero-length
    /// or not finite.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self, ResolveError> {
        let len = direction.norm();
        if !len.is_finite() || len < TOLERANCE {
            return Err(ResolveError::DegenerateCamera(
                "ray direction must be non-zero".into(),
            ));
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Returns the ray origin.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Evaluates the ray at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}
