use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, warn};

use super::{visuals, PathEditor};
use crate::error::{ExportError, Result, SnapshotError};
use crate::io::{export_snapshot, ExportFormat, ExportedFile, KeyValueStore, Snapshot, STORAGE_KEY};
use crate::math::LENGTH_TOLERANCE;
use crate::path::{Path, PathId};
use crate::scene::Scene;

impl<S: Scene> PathEditor<S> {
    /// Captures the committed paths as a current-version snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.paths, Utc::now())
    }

    /// Exports the committed paths.
    ///
    /// # Errors
    ///
    /// [`ExportError::EmptyCollection`] when there is nothing to export.
    pub fn export(&self, format: ExportFormat) -> std::result::Result<ExportedFile, ExportError> {
        export_snapshot(&self.snapshot(), format, Utc::now())
    }

    /// Exports using a format name such as `"csv"`.
    ///
    /// # Errors
    ///
    /// [`ExportError::UnsupportedFormat`] for unknown names, otherwise as
    /// [`export`](Self::export).
    pub fn export_as(&self, format: &str) -> std::result::Result<ExportedFile, ExportError> {
        self.export(format.parse()?)
    }

    /// Replaces the collection with the paths of `snapshot`.
    ///
    /// Records with fewer than two points are skipped. Stored ids are kept
    /// unless they were already issued by this editor or repeat within the
    /// snapshot, in which case a fresh id is assigned. Lengths are always
    /// recomputed from the points. Drawing mode is left and any in-progress
    /// path is discarded. Returns the number of paths loaded.
    ///
    /// # Errors
    ///
    /// [`SnapshotError::UnsupportedVersion`], [`SnapshotError::IdOutOfRange`]
    /// for ids above [`PathId::MAX_STORED`] and [`SnapshotError::InvalidStyle`];
    /// the collection is untouched.
    pub fn load_snapshot(&mut self, snapshot: &Snapshot) -> std::result::Result<usize, SnapshotError> {
        snapshot.check_version()?;

        let mut records = Vec::with_capacity(snapshot.paths.len());
        for (i, record) in snapshot.paths.iter().enumerate() {
            if record.points.len() < crate::path::MIN_COMPLETE_POINTS {
                warn!(record = i, points = record.points.len(), "skipping incomplete stored path");
                continue;
            }
            if let Some(id) = record.id.filter(|&id| id > PathId::MAX_STORED) {
                return Err(SnapshotError::IdOutOfRange(id));
            }
            record
                .style
                .validate()
                .map_err(|source| SnapshotError::InvalidStyle { record: i, source })?;
            records.push(record);
        }

        let floor = self.next_id;
        let mut taken = HashSet::new();
        let kept: Vec<Option<u64>> = records
            .iter()
            .map(|r| r.id.filter(|&id| id >= floor && taken.insert(id)))
            .collect();
        let mut next_id = match taken.iter().max() {
            Some(&max) => {
                let successor = max.checked_add(1).ok_or(SnapshotError::IdOutOfRange(max))?;
                floor.max(successor)
            }
            None => floor,
        };

        let fallback_created = snapshot.created.unwrap_or_else(Utc::now);
        let mut loaded = Vec::with_capacity(records.len());
        for (record, kept_id) in records.iter().zip(kept) {
            let id = match kept_id {
                Some(id) => PathId(id),
                None => {
                    let fresh = next_id;
                    next_id = next_id
                        .checked_add(1)
                        .ok_or(SnapshotError::IdOutOfRange(fresh))?;
                    PathId(fresh)
                }
            };
            let name = record
                .name
                .clone()
                .unwrap_or_else(|| format!("Path {}", id.ordinal()));

            let mut path = Path::with_points(id, name, record.style, record.to_points());
            path.set_created(record.created.unwrap_or(fallback_created));

            if (path.length() - record.distance).abs() > LENGTH_TOLERANCE {
                warn!(
                    id = %id,
                    stored = record.distance,
                    computed = path.length(),
                    "stored path distance does not match its points"
                );
            }
            loaded.push(path);
        }

        self.clear_all();
        self.drawing = false;
        self.next_id = next_id;
        for mut path in loaded {
            visuals::rebuild(&mut self.scene, &mut path, false);
            self.paths.push(path);
        }

        info!(
            loaded = self.paths.len(),
            legacy = snapshot.is_legacy(),
            "loaded path snapshot"
        );
        Ok(self.paths.len())
    }

    /// Parses `json` and loads it as with [`load_snapshot`](Self::load_snapshot).
    ///
    /// # Errors
    ///
    /// Parse and version errors; the collection is untouched.
    pub fn load_json(&mut self, json: &str) -> std::result::Result<usize, SnapshotError> {
        let snapshot = Snapshot::from_json(json)?;
        self.load_snapshot(&snapshot)
    }

    /// Persists the collection under [`STORAGE_KEY`].
    ///
    /// # Errors
    ///
    /// [`ExportError::EmptyCollection`] when there are no paths, encoding
    /// errors and store failures.
    pub fn save_to(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        if self.paths.is_empty() {
            return Err(ExportError::EmptyCollection.into());
        }
        let json = self.snapshot().to_json().map_err(ExportError::from)?;
        store.set(STORAGE_KEY, &json)?;
        info!(paths = self.paths.len(), "saved paths to store");
        Ok(())
    }

    /// Restores the collection saved by [`save_to`](Self::save_to). Returns
    /// `false` if the store holds nothing.
    ///
    /// # Errors
    ///
    /// Store failures and snapshot errors; the collection is untouched.
    pub fn load_from(&mut self, store: &dyn KeyValueStore) -> Result<bool> {
        let Some(json) = store.get(STORAGE_KEY)? else {
            return Ok(false);
        };
        self.load_json(&json)?;
        Ok(true)
    }
}
