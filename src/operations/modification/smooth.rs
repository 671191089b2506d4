use crate::error::EditError;
use crate::math::Point3;

/// Resamples a polyline along a uniform Catmull–Rom spline.
///
/// For every segment `p[i] → p[i+1]` the spline is evaluated at
/// `t = k / segments` for `k in 0..segments`, using `p[i-1]` and `p[i+2]` as
/// outer control points (clamped to the first/last point at the ends). The
/// final input point is appended once, so the output has
/// `(n - 1) * segments + 1` points and passes through every input point.
pub struct Smooth {
    segments: usize,
}

impl Smooth {
    /// Minimum input size for the operation to do anything.
    pub const MIN_POINTS: usize = 3;

    /// Creates a new `Smooth` operation.
    #[must_use]
    pub fn new(segments: usize) -> Self {
        Self { segments }
    }

    /// Executes the resampling.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InsufficientData`] for fewer than three points and
    /// [`EditError::InvalidParameter`] when `segments` is zero.
    pub fn execute(&self, points: &[Point3]) -> Result<Vec<Point3>, EditError> {
        if self.segments == 0 {
            return Err(EditError::InvalidParameter(
                "smoothing needs at least one segment per span".into(),
            ));
        }
        let n = points.len();
        if n < Self::MIN_POINTS {
            return Err(EditError::InsufficientData {
                required: Self::MIN_POINTS,
                actual: n,
            });
        }

        #[allow(clippy::cast_precision_loss)]
        let step = 1.0 / self.segments as f64;
        let mut out = Vec::with_capacity((n - 1) * self.segments + 1);
        for i in 0..n - 1 {
            let p0 = &points[i.saturating_sub(1)];
            let p1 = &points[i];
            let p2 = &points[i + 1];
            let p3 = &points[(i + 2).min(n - 1)];
            for k in 0..self.segments {
                #[allow(clippy::cast_precision_loss)]
                let t = k as f64 * step;
                out.push(catmull_rom(p0, p1, p2, p3, t));
            }
        }
        out.push(points[n - 1]);
        Ok(out)
    }
}

/// Evaluates the classic uniform Catmull–Rom segment between `p1` and `p2`.
#[must_use]
pub fn catmull_rom(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3, t: f64) -> Point3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let (a, b, c, d) = (p0.coords, p1.coords, p2.coords, p3.coords);

    let v = (b * 2.0
        + (c - a) * t
        + (a * 2.0 - b * 5.0 + c * 4.0 - d) * t2
        + (-a + b * 3.0 - c * 3.0 + d) * t3)
        * 0.5;
    Point3::from(v)
}
