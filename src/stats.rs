use serde::Serialize;

use crate::path::Path;

/// Aggregate figures over a path collection. All zero when it is empty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStatistics {
    pub total_paths: usize,
    pub total_points: usize,
    pub total_distance: f64,
    pub avg_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub avg_points_per_path: f64,
}

impl PathStatistics {
    #[must_use]
    pub fn from_paths(paths: &[Path]) -> Self {
        if paths.is_empty() {
            return Self::default();
        }

        let total_distance: f64 = paths.iter().map(Path::length).sum();
        let total_points: usize = paths.iter().map(Path::len).sum();
        let (min_distance, max_distance) = paths
            .iter()
            .map(Path::length)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            });

        #[allow(clippy::cast_precision_loss)]
        let count = paths.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let avg_points_per_path = total_points as f64 / count;

        Self {
            total_paths: paths.len(),
            total_points,
            total_distance,
            avg_distance: total_distance / count,
            min_distance,
            max_distance,
            avg_points_per_path,
        }
    }
}
