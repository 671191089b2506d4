use crate::error::EditError;
use crate::math::{Point3, Vector3};

/// Translates points by a displacement vector.
pub struct Translate {
    offset: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(offset: Vector3) -> Self {
        Self { offset }
    }

    /// Executes the translation.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidParameter`] if the offset is not finite.
    pub fn execute(&self, points: &[Point3]) -> Result<Vec<Point3>, EditError> {
        if self.offset.iter().any(|v| !v.is_finite()) {
            return Err(EditError::InvalidParameter(
                "translation offset must be finite".into(),
            ));
        }
        Ok(points.iter().map(|p| p + self.offset).collect())
    }
}
