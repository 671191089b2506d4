use crate::error::ResolveError;
use crate::math::{Point3, Ray, Vector3, TOLERANCE};

/// Pointer position in normalized device coordinates, both axes in `[-1, 1]`
/// with `+y` pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ndc {
    pub x: f64,
    pub y: f64,
}

impl Ndc {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Screen rectangle of the rendering surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Converts a client-space pixel position into normalized device coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::DegenerateCamera`] if the viewport has no area.
    pub fn to_ndc(&self, px: f64, py: f64) -> Result<Ndc, ResolveError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ResolveError::DegenerateCamera(
                "viewport has zero area".into(),
            ));
        }
        Ok(Ndc {
            x: ((px - self.left) / self.width) * 2.0 - 1.0,
            y: -((py - self.top) / self.height) * 2.0 + 1.0,
        })
    }
}

/// Projection model of a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// `fov_y` is the full vertical field of view in radians.
    Perspective { fov_y: f64, aspect: f64 },
    /// Half extents of the view volume in world units.
    Orthographic { half_width: f64, half_height: f64 },
}

/// Camera parameters needed to cast pointer rays.
///
/// `near` and `far` are view depths measured along the viewing direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3,
    pub target: Point3,
    pub up: Vector3,
    pub near: f64,
    pub far: f64,
    pub projection: Projection,
}

impl Camera {
    /// A perspective camera at `position` looking at `target` with `+y` up.
    #[must_use]
    pub fn perspective(position: Point3, target: Point3, fov_y: f64, aspect: f64) -> Self {
        Self {
            position,
            target,
            up: Vector3::y(),
            near: 0.1,
            far: 1000.0,
            projection: Projection::Perspective { fov_y, aspect },
        }
    }

    /// Returns a copy with the given depth range.
    #[must_use]
    pub fn with_depth_range(mut self, near: f64, far: f64) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Orthonormal `(forward, right, up)` basis of the view.
    ///
    /// # Errors
    ///
    /// Returns an error if `target == position` or `up` is parallel to the
    /// viewing direction.
    pub fn basis(&self) -> Result<(Vector3, Vector3, Vector3), ResolveError> {
        let forward = self.target - self.position;
        let len = forward.norm();
        if len < TOLERANCE {
            return Err(ResolveError::DegenerateCamera(
                "camera target coincides with its position".into(),
            ));
        }
        let forward = forward / len;

        let right = forward.cross(&self.up);
        let right_len = right.norm();
        if right_len < TOLERANCE {
            return Err(ResolveError::DegenerateCamera(
                "camera up vector is parallel to the view direction".into(),
            ));
        }
        let right = right / right_len;
        let up = right.cross(&forward);
        Ok((forward, right, up))
    }

    /// Casts the pointer ray through `ndc`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::DegenerateCamera`] for an invalid basis, depth
    /// range or projection.
    pub fn ray(&self, ndc: Ndc) -> Result<Ray, ResolveError> {
        self.validate()?;
        let (forward, right, up) = self.basis()?;

        match self.projection {
            Projection::Perspective { fov_y, aspect } => {
                let half = (fov_y * 0.5).tan();
                let dir = forward + right * (ndc.x * half * aspect) + up * (ndc.y * half);
                Ray::new(self.position, dir)
            }
            Projection::Orthographic {
                half_width,
                half_height,
            } => {
                let origin =
                    self.position + right * (ndc.x * half_width) + up * (ndc.y * half_height);
                Ray::new(origin, forward)
            }
        }
    }

    /// Converts a view depth into the parameter of `ray` reaching that depth.
    ///
    /// # Errors
    ///
    /// Returns an error if the ray does not travel forward through the view.
    pub fn depth_to_ray_t(&self, ray: &Ray, depth: f64) -> Result<f64, ResolveError> {
        let (forward, _, _) = self.basis()?;
        let cos = ray.direction().dot(&forward);
        if cos < TOLERANCE {
            return Err(ResolveError::DegenerateCamera(
                "ray does not point into the view volume".into(),
            ));
        }
        Ok(depth / cos)
    }

    fn validate(&self) -> Result<(), ResolveError> {
        if !(self.near >= 0.0 && self.far > self.near) {
            return Err(ResolveError::DegenerateCamera(format!(
                "invalid depth range [{}, {}]",
                self.near, self.far
            )));
        }
        let ok = match self.projection {
            Projection::Perspective { fov_y, aspect } => {
                fov_y > 0.0 && fov_y < std::f64::consts::PI && aspect > 0.0
            }
            Projection::Orthographic {
                half_width,
                half_height,
            } => half_width > 0.0 && half_height > 0.0,
        };
        if ok {
            Ok(())
        } else {
            Err(ResolveError::DegenerateCamera(
                "invalid projection parameters".into(),
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn viewport_center_maps_to_origin() {
        let vp = Viewport::new(10.0, 20.0, 200.0, 100.0);
        let ndc = vp.to_ndc(110.0, 70.0).unwrap();
        assert!(ndc.x.abs() < 1e-12 && ndc.y.abs() < 1e-12);

        let corner = vp.to_ndc(10.0, 20.0).unwrap();
        assert_eq!(corner, Ndc::new(-1.0, 1.0));
    }

    #[test]
    fn zero_area_viewport_fails() {
        assert!(Viewport::new(0.0, 0.0, 0.0, 10.0).to_ndc(1.0, 1.0).is_err());
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = Camera::perspective(p(0.0, 5.0, 5.0), p(0.0, 0.0, 0.0), FRAC_PI_2, 1.5);
        let ray = cam.ray(Ndc::new(0.0, 0.0)).unwrap();
        let expected = (p(0.0, 0.0, 0.0) - p(0.0, 5.0, 5.0)).normalize();
        assert!((ray.direction() - expected).norm() < 1e-12);
        assert_eq!(*ray.origin(), p(0.0, 5.0, 5.0));
    }

    #[test]
    fn edge_ray_matches_field_of_view() {
        // 90° vertical fov: the top edge ray is 45° above the view axis.
        let cam = Camera::perspective(p(0.0, 0.0, 0.0), p(0.0, 0.0, -1.0), FRAC_PI_2, 1.0);
        let ray = cam.ray(Ndc::new(0.0, 1.0)).unwrap();
        let d = ray.direction();
        assert!((d.y - d.z.abs()).abs() < 1e-12);
    }

    #[test]
    fn orthographic_rays_are_parallel() {
        let cam = Camera {
            up: Vector3::new(0.0, 0.0, -1.0),
            projection: Projection::Orthographic {
                half_width: 4.0,
                half_height: 2.0,
            },
            ..Camera::perspective(p(0.0, 10.0, 0.0), p(0.0, 0.0, 0.0), 1.0, 1.0)
        };
        let a = cam.ray(Ndc::new(-1.0, 0.0)).unwrap();
        let b = cam.ray(Ndc::new(1.0, 1.0)).unwrap();
        assert!((a.direction() - b.direction()).norm() < 1e-12);
        assert!(((a.origin() - b.origin()).norm() - (64.0_f64 + 4.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn depth_converts_to_ray_parameter() {
        let cam = Camera::perspective(p(0.0, 0.0, 0.0), p(0.0, 0.0, -1.0), FRAC_PI_2, 1.0);
        let ray = cam.ray(Ndc::new(1.0, 0.0)).unwrap();
        let t = cam.depth_to_ray_t(&ray, 10.0).unwrap();
        let point = ray.at(t);
        assert!((point.z + 10.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_cameras_fail() {
        let same = Camera::perspective(p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), 1.0, 1.0);
        assert!(same.ray(Ndc::new(0.0, 0.0)).is_err());

        let looking_up = Camera::perspective(p(0.0, 0.0, 0.0), p(0.0, 5.0, 0.0), 1.0, 1.0);
        assert!(looking_up.ray(Ndc::new(0.0, 0.0)).is_err());

        let bad_range = Camera::perspective(p(0.0, 0.0, 0.0), p(0.0, 0.0, -1.0), 1.0, 1.0)
            .with_depth_range(5.0, 1.0);
        assert!(bad_range.ray(Ndc::new(0.0, 0.0)).is_err());
    }
}
