use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::snapshot::Snapshot;
use crate::error::ExportError;

/// File formats the collection can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// The full snapshot, pretty-printed.
    Json,
    /// One row per point: `Path_ID,Point_Index,X,Y,Z,Distance`.
    Csv,
    /// Wavefront OBJ vertices and line elements.
    Obj,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Obj => "obj",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::Obj => "text/plain",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "obj" => Ok(Self::Obj),
            _ => Err(ExportError::UnsupportedFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An export ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub content: String,
    /// `paths_<YYYY-MM-DD>.<ext>`
    pub filename: String,
    pub mime_type: &'static str,
}

/// Renders `snapshot` in `format`.
///
/// # Errors
///
/// - [`ExportError::EmptyCollection`] if the snapshot holds no paths.
/// - [`ExportError::Serialize`] if JSON encoding fails.
pub fn export_snapshot(
    snapshot: &Snapshot,
    format: ExportFormat,
    date: DateTime<Utc>,
) -> Result<ExportedFile, ExportError> {
    if snapshot.paths.is_empty() {
        return Err(ExportError::EmptyCollection);
    }

    let content = match format {
        ExportFormat::Json => snapshot.to_json()?,
        ExportFormat::Csv => to_csv(snapshot),
        ExportFormat::Obj => to_obj(snapshot),
    };

    Ok(ExportedFile {
        content,
        filename: format!("paths_{}.{}", date.format("%Y-%m-%d"), format.extension()),
        mime_type: format.mime_type(),
    })
}

fn to_csv(snapshot: &Snapshot) -> String {
    let mut out = String::from("Path_ID,Point_Index,X,Y,Z,Distance\n");
    for path in &snapshot.paths {
        let id = path.id.unwrap_or_default();
        for (i, p) in path.points.iter().enumerate() {
            out.push_str(&format!(
                "{id},{i},{},{},{},{}\n",
                p.x, p.y, p.z, path.distance
            ));
        }
    }
    out
}

fn to_obj(snapshot: &Snapshot) -> String {
    let mut out = String::from("# 3D Path Export\n");
    // OBJ vertex indices are 1-based and global across the file.
    let mut base = 1;
    for path in &snapshot.paths {
        out.push_str(&format!(
            "# Path {}: {}\n",
            path.id.unwrap_or_default(),
            path.name.as_deref().unwrap_or_default()
        ));
        for p in &path.points {
            out.push_str(&format!("v {} {} {}\n", p.x, p.y, p.z));
        }
        for i in 0..path.points.len().saturating_sub(1) {
            out.push_str(&format!("l {} {}\n", base + i, base + i + 1));
        }
        base += path.points.len();
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::math::Point3;
    use crate::path::{Path, PathId, PathStyle};

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap()
    }

    fn snapshot() -> Snapshot {
        let a = Path::with_points(
            PathId(0),
            "a",
            PathStyle::default(),
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
        );
        let b = Path::with_points(
            PathId(4),
            "b",
            PathStyle::default(),
            vec![
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
                Point3::new(0.5, 2.0, 0.0),
            ],
        );
        Snapshot::capture([&a, &b], date())
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("OBJ".parse::<ExportFormat>().unwrap(), ExportFormat::Obj);
        assert!(matches!(
            "xlsx".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(f)) if f == "xlsx"
        ));
    }

    #[test]
    fn csv_has_one_row_per_point() {
        let file = export_snapshot(&snapshot(), ExportFormat::Csv, date()).unwrap();
        let lines: Vec<&str> = file.content.lines().collect();
        assert_eq!(lines[0], "Path_ID,Point_Index,X,Y,Z,Distance");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[2], "0,1,1,0,0,1");
        assert_eq!(lines[5], "4,2,0.5,2,0,1.5");
        assert_eq!(file.filename, "paths_2024-05-17.csv");
        assert_eq!(file.mime_type, "text/csv");
    }

    #[test]
    fn obj_indices_continue_across_paths() {
        let file = export_snapshot(&snapshot(), ExportFormat::Obj, date()).unwrap();
        let lines: Vec<&str> = file.content.lines().filter(|l| l.starts_with('l')).collect();
        assert_eq!(lines, ["l 1 2", "l 3 4", "l 4 5"]);
        assert!(file.content.contains("# Path 4: b\n"));
        assert_eq!(file.content.lines().filter(|l| l.starts_with("v ")).count(), 5);
    }

    #[test]
    fn json_export_is_the_snapshot() {
        let snap = snapshot();
        let file = export_snapshot(&snap, ExportFormat::Json, date()).unwrap();
        assert_eq!(Snapshot::from_json(&file.content).unwrap(), snap);
        assert_eq!(file.mime_type, "application/json");
    }

    #[test]
    fn empty_collection_is_an_error() {
        let empty = Snapshot::capture(std::iter::empty::<&Path>(), date());
        for format in [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Obj] {
            assert!(matches!(
                export_snapshot(&empty, format, date()),
                Err(ExportError::EmptyCollection)
            ));
        }
    }
}
