//! Pointer-to-anchor resolution.
//!
//! Turns a pointer position and camera into a 3D anchor point, either on the
//! point cloud or on the drawing plane, and optionally snaps it onto a nearby
//! cloud sample.
//!
//! Point clouds are sparse and noisy, so a literal first hit along the ray
//! jitters between clicks. Two deliberate approximations stabilise it:
//!
//! - when the ray grazes several samples (or none), the anchor is the probed
//!   ray depth with the densest neighbourhood, not the nearest sample;
//! - snapping prefers a sample in a dense patch over a marginally closer
//!   isolated one.
//!
//! Both trade a little positional bias for repeatable anchors.

mod config;
mod density;
mod snap;

pub use config::{DensityParams, ResolverConfig, MIN_DENSITY_SAMPLES};
pub use density::{depth_density_peak, DensityPeak};
pub use snap::{find_snap_target, SnapTarget};

use tracing::debug;

use crate::cloud::PointCloud;
use crate::error::ResolveError;
use crate::geometry::{Camera, Ndc, Plane};
use crate::math::intersect_3d::{ray_plane_intersect, RayPlaneRelation};
use crate::math::{Point3, Ray};

/// Which target produced the raw intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSource {
    /// The ray picked exactly one cloud sample.
    CloudSample,
    /// Densest probed depth along the ray.
    DensityPeak,
    /// Fixed-fraction depth guess; the cloud gave no usable signal.
    DepthFallback,
    /// Intersection with the drawing plane.
    Plane,
}

/// Outcome of a successful resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPoint {
    /// Final anchor position (snapped if a snap target was found).
    pub point: Point3,
    /// Intersection before snapping.
    pub raw: Point3,
    pub source: HitSource,
    /// Cloud sample the point was snapped onto.
    pub snapped_to: Option<usize>,
}

impl ResolvedPoint {
    #[must_use]
    pub fn is_snapped(&self) -> bool {
        self.snapped_to.is_some()
    }
}

/// Resolves a pointer position into a 3D anchor.
///
/// With a non-empty `cloud` the ray is tested against its samples (see the
/// module docs); without one, the ray is intersected with `plane`. Snapping
/// runs afterwards whenever it is enabled and a cloud is present.
///
/// # Errors
///
/// - [`ResolveError::NotFound`] when there is no cloud and the ray misses
///   the plane (parallel to it or pointing away). The caller must not add a
///   point in this case.
/// - [`ResolveError::DegenerateCamera`] for unusable camera parameters.
pub fn resolve(
    pointer: Ndc,
    camera: &Camera,
    cloud: Option<&PointCloud>,
    plane: &Plane,
    config: &ResolverConfig,
) -> Result<ResolvedPoint, ResolveError> {
    let ray = camera.ray(pointer)?;
    let cloud = cloud.filter(|c| !c.is_empty());

    let (raw, source) = match cloud {
        Some(cloud) => intersect_cloud(&ray, camera, cloud, config)?,
        None => (intersect_plane(&ray, plane)?, HitSource::Plane),
    };

    let snap = cloud
        .filter(|_| config.snap_enabled)
        .and_then(|c| {
            find_snap_target(&raw, c, config.snap_tolerance, config.density_tolerance_ratio)
        });

    if let Some(target) = snap {
        debug!(
            index = target.index,
            distance = target.distance,
            neighbours = target.neighbours,
            "snapped anchor to cloud sample"
        );
    }

    Ok(ResolvedPoint {
        point: snap.map_or(raw, |t| t.point),
        raw,
        source,
        snapped_to: snap.map(|t| t.index),
    })
}

fn intersect_cloud(
    ray: &Ray,
    camera: &Camera,
    cloud: &PointCloud,
    config: &ResolverConfig,
) -> Result<(Point3, HitSource), ResolveError> {
    let t_near = camera.depth_to_ray_t(ray, camera.near)?;
    let t_far = camera.depth_to_ray_t(ray, camera.far)?;

    let hits = cloud.along_ray(ray, t_near, t_far, config.pick_radius);
    if let [only] = hits.as_slice() {
        return Ok((only.point, HitSource::CloudSample));
    }

    if let Some(peak) = depth_density_peak(ray, t_near, t_far, cloud, &config.density) {
        return Ok((peak.point, HitSource::DensityPeak));
    }

    if let Some(front) = hits.first() {
        debug!(hits = hits.len(), "no density peak, using front-most ray hit");
        return Ok((front.point, HitSource::CloudSample));
    }

    let fraction = config.density.fallback_depth_fraction;
    let depth = camera.near + fraction * (camera.far - camera.near);
    let t = camera.depth_to_ray_t(ray, depth)?;
    debug!(depth, "ray missed the cloud, using fixed-depth fallback");
    Ok((ray.at(t), HitSource::DepthFallback))
}

fn intersect_plane(ray: &Ray, plane: &Plane) -> Result<Point3, ResolveError> {
    match ray_plane_intersect(ray, plane) {
        RayPlaneRelation::Point { point, .. } => Ok(point),
        // A ray lying in the plane hits it everywhere; its origin is the anchor.
        RayPlaneRelation::OnPlane => Ok(*ray.origin()),
        RayPlaneRelation::Behind | RayPlaneRelation::Parallel => {
            debug!("pointer ray misses the drawing plane");
            Err(ResolveError::NotFound)
        }
    }
}
