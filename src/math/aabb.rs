use super::Point3;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Computes the bounding box of a point set, or `None` when it is empty.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some(Self { min, max })
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the box grown by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        let m = super::Vector3::repeat(margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_box() {
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn center_of_points() {
        let pts = [
            Point3::new(-1.0, 2.0, 0.0),
            Point3::new(3.0, -2.0, 1.0),
            Point3::new(0.0, 0.0, 5.0),
        ];
        let bb = Aabb::from_points(&pts).unwrap();
        assert_eq!(bb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(bb.max, Point3::new(3.0, 2.0, 5.0));
        assert_eq!(bb.center(), Point3::new(1.0, 0.0, 2.5));
    }
}
