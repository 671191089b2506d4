//! Point-cloud sample store backed by an R-tree.
//!
//! The resolver only ever asks three kinds of questions of a cloud: which
//! samples lie within a radius of a point, which lie close to a pointer ray,
//! and how crowded a neighbourhood is. All three map onto `rstar` queries.

use rstar::primitives::GeomWithData;
use rstar::{RTree, SelectionFunction, AABB};

use crate::math::distance_3d::point_to_ray;
use crate::math::intersect_3d::ray_segment_hits_aabb;
use crate::math::{Aabb, Point3, Ray};

/// R-tree entry: sample coordinates plus its index in the input order.
type Sample = GeomWithData<[f64; 3], usize>;

/// A sample picked up by a ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Index of the sample in the cloud's input order.
    pub index: usize,
    pub point: Point3,
    /// Ray parameter of the sample's projection onto the ray.
    pub t: f64,
    /// Perpendicular distance from the sample to the ray.
    pub distance: f64,
}

/// An immutable set of surface samples with spatial lookups.
#[derive(Debug, Clone)]
pub struct PointCloud {
    points: Vec<Point3>,
    tree: RTree<Sample>,
}

impl PointCloud {
    /// Bulk-loads the samples into the index.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        let entries = points
            .iter()
            .enumerate()
            .map(|(i, p)| GeomWithData::new([p.x, p.y, p.z], i))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            points,
        }
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the sample at `index` (input order).
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&Point3> {
        self.points.get(index)
    }

    /// All samples in input order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Samples within `radius` of `center`, as `(index, point)` in ascending
    /// index order.
    #[must_use]
    pub fn within_radius(&self, center: &Point3, radius: f64) -> Vec<(usize, Point3)> {
        let mut found: Vec<(usize, Point3)> = self
            .tree
            .locate_within_distance([center.x, center.y, center.z], radius * radius)
            .map(|s| (s.data, self.points[s.data]))
            .collect();
        found.sort_unstable_by_key(|(i, _)| *i);
        found
    }

    /// Number of samples within `radius` of `center`.
    #[must_use]
    pub fn count_within(&self, center: &Point3, radius: f64) -> usize {
        self.tree
            .locate_within_distance([center.x, center.y, center.z], radius * radius)
            .count()
    }

    /// The sample closest to `center`.
    #[must_use]
    pub fn nearest(&self, center: &Point3) -> Option<(usize, Point3)> {
        self.tree
            .nearest_neighbor(&[center.x, center.y, center.z])
            .map(|s| (s.data, self.points[s.data]))
    }

    /// Samples lying within `radius` of the ray section `t ∈ [t_min, t_max]`,
    /// ordered front to back (ties by index).
    #[must_use]
    pub fn along_ray(&self, ray: &Ray, t_min: f64, t_max: f64, radius: f64) -> Vec<RayHit> {
        let selection = RayCapsule {
            ray,
            t_min,
            t_max,
            radius,
        };
        let mut hits: Vec<RayHit> = self
            .tree
            .locate_with_selection_function(selection)
            .filter_map(|s| {
                let point = self.points[s.data];
                let (distance, t) = point_to_ray(&point, ray);
                (distance <= radius && t >= t_min && t <= t_max).then_some(RayHit {
                    index: s.data,
                    point,
                    t,
                    distance,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.t.total_cmp(&b.t).then(a.index.cmp(&b.index)));
        hits
    }
}

/// Prunes R-tree nodes whose envelope, grown by the capsule radius, misses the
/// ray section. Leaves are filtered exactly by the caller.
struct RayCapsule<'a> {
    ray: &'a Ray,
    t_min: f64,
    t_max: f64,
    radius: f64,
}

impl SelectionFunction<Sample> for RayCapsule<'_> {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 3]>) -> bool {
        let bounds = Aabb {
            min: Point3::from(envelope.lower()),
            max: Point3::from(envelope.upper()),
        }
        .expanded(self.radius);
        ray_segment_hits_aabb(self.ray, self.t_min, self.t_max, &bounds)
    }
}
