mod style;

pub use style::{LineType, PathStyle, StyleOverride};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::math::distance_3d::polyline_length;
use crate::math::Point3;
use crate::scene::PathVisuals;

/// Anchor point type. Paths own their points by value.
pub type Point = Point3;

/// Minimum point count of a committed path.
pub const MIN_COMPLETE_POINTS: usize = 2;

/// Stable path identifier, issued from a monotonic counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathId(pub u64);

impl PathId {
    /// Largest id accepted from stored data. Ids above it would leave the
    /// editor's counter no room to issue successors.
    pub const MAX_STORED: u64 = u64::MAX >> 1;

    /// One-based number used in default path names.
    #[must_use]
    pub fn ordinal(self) -> u64 {
        self.0.saturating_add(1)
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An ordered polyline of anchor points with its cached length.
///
/// The point sequence is only mutable through methods that recompute
/// `length` before returning, so the cached value always equals the sum of
/// segment lengths.
#[derive(Debug)]
pub struct Path {
    id: PathId,
    name: String,
    points: Vec<Point>,
    length: f64,
    style: PathStyle,
    created: DateTime<Utc>,
    pub(crate) visuals: PathVisuals,
}

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new(id: PathId, name: impl Into<String>, style: PathStyle) -> Self {
        Self::with_points(id, name, style, Vec::new())
    }

    /// Creates a path from an existing point sequence.
    #[must_use]
    pub fn with_points(
        id: PathId,
        name: impl Into<String>,
        style: PathStyle,
        points: Vec<Point>,
    ) -> Self {
        let mut path = Self {
            id,
            name: name.into(),
            points: Vec::new(),
            length: 0.0,
            style,
            created: Utc::now(),
            visuals: PathVisuals::default(),
        };
        path.set_points(points);
        path
    }

    #[must_use]
    pub fn id(&self) -> PathId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Sum of Euclidean segment lengths; `0` for fewer than two points.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn style(&self) -> &PathStyle {
        &self.style
    }

    #[must_use]
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Number of anchor points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the path has enough points to be committed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.points.len() >= MIN_COMPLETE_POINTS
    }

    /// First and last points.
    #[must_use]
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((*self.points.first()?, *self.points.last()?))
    }

    pub(crate) fn push_point(&mut self, point: Point) {
        self.points.push(point);
        self.recompute_length();
    }

    /// Replaces the whole point sequence in one step.
    pub(crate) fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
        self.recompute_length();
    }

    pub(crate) fn reverse_points(&mut self) {
        self.points.reverse();
        self.recompute_length();
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_style(&mut self, style: PathStyle) {
        self.style = style;
    }

    pub(crate) fn set_created(&mut self, created: DateTime<Utc>) {
        self.created = created;
    }

    fn recompute_length(&mut self) {
        self.length = polyline_length(&self.points);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point {
        Point::new(x, y, z)
    }

    #[test]
    fn length_tracks_every_mutation() {
        let mut path = Path::new(PathId(0), "a", PathStyle::default());
        assert!(path.length().abs() < f64::EPSILON);

        path.push_point(p(0.0, 0.0, 0.0));
        assert!(path.length().abs() < f64::EPSILON);
        assert!(!path.is_complete());

        path.push_point(p(3.0, 4.0, 0.0));
        assert_relative_eq!(path.length(), 5.0);
        assert!(path.is_complete());

        path.set_points(vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, 2.0), p(0.0, 1.0, 2.0)]);
        assert_relative_eq!(path.length(), 3.0);

        path.reverse_points();
        assert_relative_eq!(path.length(), 3.0);
        assert_eq!(path.endpoints().unwrap(), (p(0.0, 1.0, 2.0), p(0.0, 0.0, 0.0)));
    }

    #[test]
    fn path_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&PathId(7)).unwrap(), "7");
        assert_eq!(PathId(7).to_string(), "7");
    }
}
