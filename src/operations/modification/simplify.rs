use crate::error::EditError;
use crate::math::distance_3d::point_to_segment_dist;
use crate::math::Point3;

/// One-pass redundant-point removal.
///
/// Each interior point is measured against the segment joining its *original*
/// immediate neighbours and dropped when that distance is at most
/// `tolerance`. Endpoints always survive. This is a single O(n) sweep, not a
/// recursive Douglas–Peucker, so it does not search for the minimal point set.
pub struct Simplify {
    tolerance: f64,
}

impl Simplify {
    /// Minimum input size for the operation to do anything.
    pub const MIN_POINTS: usize = 3;

    /// Creates a new `Simplify` operation.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Executes the simplification, returning the kept points in order.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InsufficientData`] for fewer than three points and
    /// [`EditError::InvalidParameter`] for a negative or non-finite tolerance.
    pub fn execute(&self, points: &[Point3]) -> Result<Vec<Point3>, EditError> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(EditError::InvalidParameter(format!(
                "simplify tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        if points.len() < Self::MIN_POINTS {
            return Err(EditError::InsufficientData {
                required: Self::MIN_POINTS,
                actual: points.len(),
            });
        }

        let mut kept = Vec::with_capacity(points.len());
        kept.push(points[0]);
        for w in points.windows(3) {
            if point_to_segment_dist(&w[1], &w[0], &w[2]) > self.tolerance {
                kept.push(w[1]);
            }
        }
        kept.push(points[points.len() - 1]);
        Ok(kept)
    }
}
