//! Rigid and uniform-scale transforms of a path's point sequence.
//!
//! Scale and rotate pivot about an explicit center or, when none is given,
//! about the bounding-box center of the points, computed on every call.

mod general;
mod rotate;
mod scale;
mod translate;

pub use general::GeneralTransform;
pub use rotate::Rotate;
pub use scale::Scale;
pub use translate::Translate;

use crate::error::EditError;
use crate::math::{Aabb, Point3, Vector3};

/// A transform request addressed to one path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformKind {
    /// Uniform scale by `factor`.
    Scale { factor: f64, center: Option<Point3> },
    /// Euler rotation in radians, applied as `Rx · Ry · Rz`.
    Rotate {
        angles: Vector3,
        center: Option<Point3>,
    },
    /// Per-point vector addition.
    Translate { offset: Vector3 },
}

impl TransformKind {
    /// Applies the transform, returning the new point sequence.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidParameter`] for non-finite parameters.
    pub fn apply(&self, points: &[Point3]) -> Result<Vec<Point3>, EditError> {
        match *self {
            Self::Scale { factor, center } => Scale::new(factor, center).execute(points),
            Self::Rotate { angles, center } => Rotate::new(angles, center).execute(points),
            Self::Translate { offset } => Translate::new(offset).execute(points),
        }
    }
}

/// Resolves the pivot: the explicit center, else the points' bounding-box center.
fn pivot(center: Option<Point3>, points: &[Point3]) -> Point3 {
    center
        .or_else(|| Aabb::from_points(points).map(|bb| bb.center()))
        .unwrap_or_else(Point3::origin)
}
