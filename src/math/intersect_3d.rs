use crate::geometry::Plane;

use super::{Aabb, Point3, Ray, TOLERANCE};

/// Relationship of a ray with a plane.
#[derive(Debug)]
pub enum RayPlaneRelation {
    /// Ray hits the plane at a single point in front of its origin.
    Point { point: Point3, t: f64 },
    /// The plane lies behind the ray origin.
    Behind,
    /// Ray is parallel to the plane (does not intersect).
    Parallel,
    /// Ray lies entirely on the plane.
    OnPlane,
}

/// Computes the intersection of `ray` with a plane.
#[must_use]
pub fn ray_plane_intersect(ray: &Ray, plane: &Plane) -> RayPlaneRelation {
    let normal = plane.normal();
    let denom = normal.dot(ray.direction());

    let diff = plane.origin() - ray.origin();
    let numer = normal.dot(&diff);

    if denom.abs() < TOLERANCE {
        if numer.abs() < TOLERANCE {
            RayPlaneRelation::OnPlane
        } else {
            RayPlaneRelation::Parallel
        }
    } else {
        let t = numer / denom;
        if t < 0.0 {
            RayPlaneRelation::Behind
        } else {
            RayPlaneRelation::Point {
                point: ray.at(t),
                t,
            }
        }
    }
}

/// Tests whether the ray section `t ∈ [t_min, t_max]` passes through `aabb`
/// (slab method).
#[must_use]
pub fn ray_segment_hits_aabb(ray: &Ray, t_min: f64, t_max: f64, aabb: &Aabb) -> bool {
    let mut lo = t_min;
    let mut hi = t_max;

    for axis in 0..3 {
        let origin = ray.origin()[axis];
        let dir = ray.direction()[axis];
        let (min, max) = (aabb.min[axis], aabb.max[axis]);

        if dir.abs() < TOLERANCE {
            if origin < min || origin > max {
                return false;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let (t0, t1) = {
            let a = (min - origin) * inv;
            let b = (max - origin) * inv;
            if a <= b { (a, b) } else { (b, a) }
        };
        lo = lo.max(t0);
        hi = hi.min(t1);
        if lo > hi {
            return false;
        }
    }

    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    fn ground() -> Plane {
        Plane::from_normal(p(0.0, 0.0, 0.0), v(0.0, 1.0, 0.0)).unwrap()
    }

    #[test]
    fn ray_hits_ground_plane() {
        let ray = Ray::new(p(0.0, 10.0, 0.0), v(1.0, -1.0, 0.0)).unwrap();
        match ray_plane_intersect(&ray, &ground()) {
            RayPlaneRelation::Point { point, t } => {
                assert!((point - p(10.0, 0.0, 0.0)).norm() < 1e-9);
                assert!(t > 0.0);
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn plane_behind_ray() {
        let ray = Ray::new(p(0.0, 10.0, 0.0), v(0.0, 1.0, 0.0)).unwrap();
        assert!(matches!(
            ray_plane_intersect(&ray, &ground()),
            RayPlaneRelation::Behind
        ));
    }

    #[test]
    fn parallel_ray_misses() {
        let ray = Ray::new(p(0.0, 1.0, 0.0), v(1.0, 0.0, 0.0)).unwrap();
        assert!(matches!(
            ray_plane_intersect(&ray, &ground()),
            RayPlaneRelation::Parallel
        ));
    }

    #[test]
    fn ray_on_plane() {
        let ray = Ray::new(p(0.0, 0.0, 0.0), v(0.0, 0.0, 1.0)).unwrap();
        assert!(matches!(
            ray_plane_intersect(&ray, &ground()),
            RayPlaneRelation::OnPlane
        ));
    }

    #[test]
    fn slab_test_hits_and_misses() {
        let ray = Ray::new(p(0.0, 0.0, 0.0), v(0.0, 0.0, -1.0)).unwrap();
        let hit = Aabb {
            min: p(-1.0, -1.0, -6.0),
            max: p(1.0, 1.0, -4.0),
        };
        let off_axis = Aabb {
            min: p(2.0, 2.0, -6.0),
            max: p(3.0, 3.0, -4.0),
        };
        assert!(ray_segment_hits_aabb(&ray, 0.0, 10.0, &hit));
        assert!(!ray_segment_hits_aabb(&ray, 0.0, 3.0, &hit));
        assert!(!ray_segment_hits_aabb(&ray, 0.0, 10.0, &off_axis));
    }
}
