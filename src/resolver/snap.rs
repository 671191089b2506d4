use crate::cloud::PointCloud;
use crate::math::Point3;

/// Chosen snap target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    /// Sample index in the cloud's input order.
    pub index: usize,
    pub point: Point3,
    pub distance: f64,
    /// Other samples within the tolerance of this one.
    pub neighbours: usize,
}

/// Finds the cloud sample to snap `point` onto.
///
/// Candidates are the samples within `tolerance`. Among those no further than
/// `ratio` times the nearest candidate's distance, the one with the most
/// neighbours inside the same tolerance wins; ties go to the nearer sample,
/// then the lower index. Sparse outliers therefore lose to a slightly farther
/// sample sitting in a dense patch.
#[must_use]
pub fn find_snap_target(
    point: &Point3,
    cloud: &PointCloud,
    tolerance: f64,
    ratio: f64,
) -> Option<SnapTarget> {
    if tolerance <= 0.0 {
        return None;
    }

    let candidates: Vec<(usize, Point3, f64)> = cloud
        .within_radius(point, tolerance)
        .into_iter()
        .map(|(i, q)| (i, q, (q - point).norm()))
        .collect();

    let nearest = candidates
        .iter()
        .map(|(_, _, d)| *d)
        .min_by(f64::total_cmp)?;
    let limit = nearest * ratio;

    let mut best: Option<SnapTarget> = None;
    for &(index, candidate, distance) in candidates.iter().filter(|(_, _, d)| *d <= limit) {
        let neighbours = cloud.count_within(&candidate, tolerance).saturating_sub(1);
        let better = match best {
            None => true,
            Some(b) => {
                neighbours > b.neighbours
                    || (neighbours == b.neighbours && distance < b.distance)
            }
        };
        if better {
            best = Some(SnapTarget {
                index,
                point: candidate,
                distance,
                neighbours,
            });
        }
    }

    best
}
