use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::math::Point3;
use crate::path::{Path, PathStyle};

/// Version written by [`Snapshot::capture`].
pub const SNAPSHOT_VERSION: &str = "2.0";

/// Serialized form of a path collection.
///
/// Reading also accepts the older unversioned layout, which stored the save
/// time as `timestamp`, the path count as `totalPaths` and carried no path
/// names or styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, alias = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default, alias = "totalPaths")]
    pub path_count: usize,
    pub paths: Vec<PathRecord>,
}

/// One path inside a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub points: Vec<PointRecord>,
    #[serde(default)]
    pub distance: f64,
    /// Missing keys fall back to the default style; unknown keys are rejected.
    #[serde(default)]
    pub style: PathStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<&Point3> for PointRecord {
    fn from(p: &Point3) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<PointRecord> for Point3 {
    fn from(p: PointRecord) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

impl PathRecord {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        Self {
            id: Some(path.id().0),
            name: Some(path.name().to_owned()),
            points: path.points().iter().map(PointRecord::from).collect(),
            distance: path.length(),
            style: *path.style(),
            created: Some(path.created()),
        }
    }

    /// Point sequence as engine points.
    #[must_use]
    pub fn to_points(&self) -> Vec<Point3> {
        self.points.iter().copied().map(Point3::from).collect()
    }
}

impl Snapshot {
    /// Captures `paths` as a current-version snapshot stamped with `now`.
    #[must_use]
    pub fn capture<'a>(paths: impl IntoIterator<Item = &'a Path>, now: DateTime<Utc>) -> Self {
        let paths: Vec<PathRecord> = paths.into_iter().map(PathRecord::from_path).collect();
        Self {
            version: Some(SNAPSHOT_VERSION.to_owned()),
            created: Some(now),
            total_distance: paths.iter().map(|p| p.distance).sum(),
            path_count: paths.len(),
            paths,
        }
    }

    /// Parses and version-checks a snapshot.
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::Parse`] for malformed JSON, wrong field types or an
    ///   unknown style key.
    /// - [`SnapshotError::UnsupportedVersion`] for any version other than the
    ///   current one or the legacy unversioned layout.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the encoder error for non-finite coordinates.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Whether this is the unversioned legacy layout.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        self.version.is_none()
    }

    /// Validates the version tag.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::UnsupportedVersion`] for unknown versions.
    pub fn check_version(&self) -> Result<(), SnapshotError> {
        match self.version.as_deref() {
            None | Some(SNAPSHOT_VERSION) => Ok(()),
            Some(other) => Err(SnapshotError::UnsupportedVersion(other.to_owned())),
        }
    }
}
