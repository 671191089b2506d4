use crate::error::EditError;
use crate::math::{Matrix4, Point3};

use super::{pivot, GeneralTransform};

/// Scales points uniformly about a center point.
pub struct Scale {
    factor: f64,
    center: Option<Point3>,
}

impl Scale {
    /// Creates a new `Scale` operation. Without a `center` the bounding-box
    /// center of the input is used.
    #[must_use]
    pub fn new(factor: f64, center: Option<Point3>) -> Self {
        Self { factor, center }
    }

    /// Executes the scaling.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidParameter`] if the factor is not finite.
    pub fn execute(&self, points: &[Point3]) -> Result<Vec<Point3>, EditError> {
        if !self.factor.is_finite() {
            return Err(EditError::InvalidParameter(format!(
                "scale factor must be finite, got {}",
                self.factor
            )));
        }
        let center = pivot(self.center, points);

        let t_neg = Matrix4::new_translation(&(-center.coords));
        let scale = Matrix4::new_scaling(self.factor);
        let t_pos = Matrix4::new_translation(&center.coords);
        GeneralTransform::new(t_pos * scale * t_neg).execute(points)
    }
}
