use crate::error::EditError;
use crate::math::{Matrix4, Point3};

/// Applies an arbitrary 4x4 transformation matrix to every point.
pub struct GeneralTransform {
    matrix: Matrix4,
}

impl GeneralTransform {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    /// Transforms all points, preserving count and order.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidParameter`] if the matrix has non-finite
    /// entries.
    pub fn execute(&self, points: &[Point3]) -> Result<Vec<Point3>, EditError> {
        if self.matrix.iter().any(|v| !v.is_finite()) {
            return Err(EditError::InvalidParameter(
                "transform matrix must be finite".into(),
            ));
        }
        Ok(points
            .iter()
            .map(|p| transform_point(&self.matrix, p))
            .collect())
    }
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    Point3::new(v.x, v.y, v.z)
}
