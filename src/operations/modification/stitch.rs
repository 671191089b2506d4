use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::math::Point3;

/// How consecutive paths are joined when stitching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StitchMethod {
    /// Append the next path directly after the chain tail.
    Linear,
    /// Insert one synthetic point halfway across the gap before appending.
    /// This is a visual softening of the join, not a shortest-path search.
    #[default]
    Shortest,
}

impl FromStr for StitchMethod {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "shortest" => Ok(Self::Shortest),
            other => Err(EditError::InvalidParameter(format!(
                "unknown stitch method: {other}"
            ))),
        }
    }
}

impl fmt::Display for StitchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::Shortest => "shortest",
        })
    }
}

/// Greedy nearest-endpoint chaining of several point sequences into one.
///
/// Starting from the first input, the remaining input whose start or end lies
/// closest to the current tail is appended next, reversed when its end was
/// the closer endpoint. Candidates are scanned in input order, the start
/// before the end, and only a strictly smaller distance replaces the current
/// best, so ties resolve to the earliest candidate.
///
/// Endpoints are never merged: `Linear` yields `Σ len` points and `Shortest`
/// yields `Σ len + (k - 1)` for `k` inputs.
pub struct Stitch {
    method: StitchMethod,
}

impl Stitch {
    /// Creates a new `Stitch` operation.
    #[must_use]
    pub fn new(method: StitchMethod) -> Self {
        Self { method }
    }

    /// Executes the stitch.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InsufficientData`] for fewer than two inputs or
    /// when an input has no points.
    pub fn execute(&self, paths: &[&[Point3]]) -> Result<Vec<Point3>, EditError> {
        if paths.len() < 2 {
            return Err(EditError::InsufficientData {
                required: 2,
                actual: paths.len(),
            });
        }
        if let Some(empty) = paths.iter().find(|p| p.is_empty()) {
            return Err(EditError::InsufficientData {
                required: 1,
                actual: empty.len(),
            });
        }

        let total: usize = paths.iter().map(|p| p.len()).sum();
        let mut chain: Vec<Point3> = Vec::with_capacity(total + paths.len());
        chain.extend_from_slice(paths[0]);
        let mut remaining: Vec<&[Point3]> = paths[1..].to_vec();

        while !remaining.is_empty() {
            let Some(tail) = chain.last().copied() else {
                break;
            };
            let (best, reverse) = closest_candidate(&tail, &remaining);
            let next = remaining.remove(best);

            let head = if reverse { next[next.len() - 1] } else { next[0] };
            if self.method == StitchMethod::Shortest {
                chain.push(nalgebra::center(&tail, &head));
            }
            if reverse {
                chain.extend(next.iter().rev());
            } else {
                chain.extend_from_slice(next);
            }
        }

        Ok(chain)
    }
}

/// Index of the closest remaining path and whether its end was the closer
/// endpoint. Falls back to the first candidate when no distance compares
/// (non-finite coordinates).
fn closest_candidate(tail: &Point3, remaining: &[&[Point3]]) -> (usize, bool) {
    let mut best = (0, false);
    let mut best_distance = f64::INFINITY;

    for (i, candidate) in remaining.iter().enumerate() {
        let to_start = (candidate[0] - tail).norm();
        if to_start < best_distance {
            best_distance = to_start;
            best = (i, false);
        }
        let to_end = (candidate[candidate.len() - 1] - tail).norm();
        if to_end < best_distance {
            best_distance = to_end;
            best = (i, true);
        }
    }

    best
}
