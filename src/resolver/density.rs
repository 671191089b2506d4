use crate::cloud::PointCloud;
use crate::math::{Point3, Ray};

use super::config::DensityParams;

/// Densest probed point along a ray section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityPeak {
    pub point: Point3,
    /// Ray parameter of `point`.
    pub t: f64,
    /// Samples found within the density radius of `point`.
    pub count: usize,
}

/// Probes `params.sample_count()` evenly spaced parameters in `[t_near, t_far]`
/// and returns the probe with the most cloud samples around it.
///
/// Only a strictly higher count replaces the current best, so equal counts
/// resolve to the probe closest to the camera. Returns `None` when every probe
/// is empty.
#[must_use]
pub fn depth_density_peak(
    ray: &Ray,
    t_near: f64,
    t_far: f64,
    cloud: &PointCloud,
    params: &DensityParams,
) -> Option<DensityPeak> {
    let n = params.sample_count();
    let mut best: Option<DensityPeak> = None;

    for i in 0..n {
        #[allow(clippy::cast_precision_loss)]
        let s = i as f64 / (n - 1) as f64;
        let t = t_near + (t_far - t_near) * s;
        let point = ray.at(t);
        let count = cloud.count_within(&point, params.radius);
        if count > best.map_or(0, |b| b.count) {
            best = Some(DensityPeak { point, t, count });
        }
    }

    best
}
