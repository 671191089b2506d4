use super::{Point3, Ray};

/// Returns the minimum distance from `point` to the segment `a`–`b`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure against the nearer endpoint. A zero-length segment degrades to
/// the point-to-point distance.
#[must_use]
pub fn point_to_segment_dist(point: &Point3, a: &Point3, b: &Point3) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();

    if len_sq < 1e-20 {
        return (point - a).norm();
    }

    let t = ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (point - closest).norm()
}

/// Returns `(distance, t)` where `t` is the ray parameter of the closest point
/// on the infinite ray line to `point`.
#[must_use]
pub fn point_to_ray(point: &Point3, ray: &Ray) -> (f64, f64) {
    let t = (point - ray.origin()).dot(ray.direction());
    let closest = ray.at(t);
    ((point - closest).norm(), t)
}

/// Sum of Euclidean distances between consecutive points.
#[must_use]
pub fn polyline_length(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn perpendicular_distance_inside_segment() {
        let d = point_to_segment_dist(&p(1.0, 2.0, 0.0), &p(0.0, 0.0, 0.0), &p(2.0, 0.0, 0.0));
        assert!((d - 2.0).abs() < 1e-12);
    }

    #[test]
    fn distance_beyond_end_uses_endpoint() {
        let d = point_to_segment_dist(&p(5.0, 0.0, 3.0), &p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segment() {
        let d = point_to_segment_dist(&p(0.0, 3.0, 4.0), &p(0.0, 0.0, 0.0), &p(0.0, 0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn ray_distance_and_parameter() {
        let ray = Ray::new(p(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0)).unwrap();
        let (d, t) = point_to_ray(&p(1.0, 0.0, -4.0), &ray);
        assert!((d - 1.0).abs() < 1e-12);
        assert!((t - 4.0).abs() < 1e-12);
    }

    #[test]
    fn length_of_polyline() {
        let pts = [p(0.0, 0.0, 0.0), p(3.0, 4.0, 0.0), p(3.0, 4.0, 2.0)];
        assert!((polyline_length(&pts) - 7.0).abs() < 1e-12);
        assert!(polyline_length(&pts[..1]).abs() < f64::EPSILON);
        assert!(polyline_length(&[]).abs() < f64::EPSILON);
    }
}
