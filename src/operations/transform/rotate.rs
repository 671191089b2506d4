use crate::error::EditError;
use crate::math::{Matrix4, Point3, Vector3};

use super::{pivot, GeneralTransform};

/// Rotates points by Euler angles about a center point.
///
/// Angles are radians about the X, Y and Z axes, composed as `Rx · Ry · Rz`
/// (Z applied first).
pub struct Rotate {
    angles: Vector3,
    center: Option<Point3>,
}

impl Rotate {
    /// Creates a new `Rotate` operation. Without a `center` the bounding-box
    /// center of the input is used.
    #[must_use]
    pub fn new(angles: Vector3, center: Option<Point3>) -> Self {
        Self { angles, center }
    }

    /// Executes the rotation.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidParameter`] if any angle is not finite.
    pub fn execute(&self, points: &[Point3]) -> Result<Vec<Point3>, EditError> {
        if self.angles.iter().any(|a| !a.is_finite()) {
            return Err(EditError::InvalidParameter(
                "rotation angles must be finite".into(),
            ));
        }
        let center = pivot(self.center, points);

        let rot = rotation_matrix(&Vector3::x(), self.angles.x)
            * rotation_matrix(&Vector3::y(), self.angles.y)
            * rotation_matrix(&Vector3::z(), self.angles.z);

        // Translate to origin, rotate, translate back
        let t_neg = Matrix4::new_translation(&(-center.coords));
        let t_pos = Matrix4::new_translation(&center.coords);
        GeneralTransform::new(t_pos * rot * t_neg).execute(points)
    }
}

/// Builds a 4x4 rotation matrix around a unit axis by an angle (Rodrigues).
#[allow(clippy::many_single_char_names, clippy::suspicious_operation_groupings)]
#[rustfmt::skip]
fn rotation_matrix(axis: &Vector3, angle: f64) -> Matrix4 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    Matrix4::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y, 0.0,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x, 0.0,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,     0.0,
        0.0,               0.0,               0.0,               1.0,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;
    use crate::math::distance_3d::polyline_length;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn assert_close(a: &Point3, b: &Point3) {
        assert!((a - b).norm() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn rotate_90_around_z_at_origin() {
        let out = Rotate::new(Vector3::new(0.0, 0.0, FRAC_PI_2), Some(Point3::origin()))
            .execute(&[p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)])
            .unwrap();
        assert_close(&out[0], &p(0.0, 1.0, 0.0));
        assert_close(&out[1], &p(0.0, 2.0, 0.0));
    }

    #[test]
    fn z_is_applied_before_x() {
        // Rz(90°) maps +x to +y, then Rx(90°) maps +y to +z.
        let out = Rotate::new(Vector3::new(FRAC_PI_2, 0.0, FRAC_PI_2), Some(Point3::origin()))
            .execute(&[p(1.0, 0.0, 0.0)])
            .unwrap();
        assert_close(&out[0], &p(0.0, 0.0, 1.0));
    }

    #[test]
    fn default_pivot_keeps_bounding_box_center() {
        let pts = vec![p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(4.0, 2.0, 0.0)];
        let out = Rotate::new(Vector3::new(0.0, 0.0, FRAC_PI_2), None)
            .execute(&pts)
            .unwrap();
        // Center (2, 1, 0): (0,0,0) -> (3, -1, 0).
        assert_close(&out[0], &p(3.0, -1.0, 0.0));
        assert_relative_eq!(polyline_length(&out), polyline_length(&pts), epsilon = 1e-9);
    }

    #[test]
    fn nan_angle_fails() {
        let result = Rotate::new(Vector3::new(f64::NAN, 0.0, 0.0), None).execute(&[p(0.0, 0.0, 0.0)]);
        assert!(result.is_err());
    }
}
