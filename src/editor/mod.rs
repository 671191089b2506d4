//! The path store and its editing operations.
//!
//! [`PathEditor`] owns the committed paths, the in-progress path and the scene
//! the paths render into. Index-addressed operations validate everything up
//! front and only mutate once the new state is fully computed, so an `Err`
//! always leaves the collection as it was.

mod persist;
mod visuals;

use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{ConfigError, EditError};
use crate::geometry::Plane;
use crate::math::{Point3, Vector3};
use crate::operations::{Simplify, Smooth, Stitch, StitchMethod, TransformKind};
use crate::path::{Path, PathId, PathStyle, StyleOverride};
use crate::scene::Scene;
use crate::stats::PathStatistics;

/// What [`PathEditor::end_drawing`] did with the in-progress path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingOutcome {
    /// The path was appended to the collection at this index.
    Committed(usize),
    /// The path had fewer than two points and was dropped.
    Discarded,
    /// No path was in progress.
    Idle,
}

/// Interactive path store.
pub struct PathEditor<S: Scene> {
    scene: S,
    paths: Vec<Path>,
    current: Option<Path>,
    drawing: bool,
    next_id: u64,
    style: PathStyle,
    drawing_plane: Plane,
    highlighted: Option<PathId>,
}

impl<S: Scene> PathEditor<S> {
    /// Creates an empty editor with default style and the `y = 0` drawing plane.
    #[must_use]
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            paths: Vec::new(),
            current: None,
            drawing: false,
            next_id: 0,
            style: PathStyle::default(),
            drawing_plane: Plane::default(),
            highlighted: None,
        }
    }

    /// Creates an editor using the style and drawing plane from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configured plane is degenerate.
    pub fn with_config(scene: S, config: &EngineConfig) -> Result<Self, ConfigError> {
        let mut editor = Self::new(scene);
        editor.style = config.style;
        editor.drawing_plane = config.drawing_plane.to_plane()?;
        Ok(editor)
    }

    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access for collaborators that draw into the same scene, such as
    /// [`FeedbackAnimator`](crate::feedback::FeedbackAnimator).
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Committed paths in collection order.
    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    #[must_use]
    pub fn path(&self, index: usize) -> Option<&Path> {
        self.paths.get(index)
    }

    /// Number of committed paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The path being drawn, if any.
    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<PathId> {
        self.highlighted
    }

    /// Style given to newly drawn paths.
    #[must_use]
    pub fn default_style(&self) -> &PathStyle {
        &self.style
    }

    pub fn set_default_style(&mut self, style: PathStyle) {
        self.style = style;
    }

    #[must_use]
    pub fn drawing_plane(&self) -> &Plane {
        &self.drawing_plane
    }

    /// Replaces the plane used when no point cloud is available.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero or non-finite normal.
    pub fn set_drawing_plane(&mut self, normal: Vector3, point: Point3) -> Result<(), ConfigError> {
        self.drawing_plane = Plane::from_normal(point, normal)?;
        debug!(?normal, ?point, "drawing plane updated");
        Ok(())
    }

    // Drawing mode.

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn begin_drawing(&mut self) {
        self.drawing = true;
    }

    /// Leaves drawing mode, committing the in-progress path if it has at least
    /// two points and discarding it otherwise.
    pub fn end_drawing(&mut self) -> DrawingOutcome {
        self.drawing = false;
        let Some(mut path) = self.current.take() else {
            return DrawingOutcome::Idle;
        };

        if path.is_complete() {
            info!(id = %path.id(), points = path.len(), length = path.length(), "path committed");
            self.paths.push(path);
            DrawingOutcome::Committed(self.paths.len() - 1)
        } else {
            debug!(id = %path.id(), points = path.len(), "discarding incomplete path");
            path.visuals.release_all(&mut self.scene);
            DrawingOutcome::Discarded
        }
    }

    /// Flips drawing mode and returns the new mode. Leaving drawing mode
    /// behaves like [`end_drawing`](Self::end_drawing).
    pub fn toggle_drawing(&mut self) -> bool {
        if self.drawing {
            self.end_drawing();
        } else {
            self.begin_drawing();
        }
        self.drawing
    }

    /// Appends an anchor to the in-progress path, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotDrawing`] outside drawing mode.
    pub fn add_point(&mut self, point: Point3) -> Result<&Path, EditError> {
        if !self.drawing {
            debug!("add_point ignored outside drawing mode");
            return Err(EditError::NotDrawing);
        }
        if !point.iter().all(|c| c.is_finite()) {
            return Err(EditError::InvalidParameter(
                "point coordinates must be finite".into(),
            ));
        }

        if self.current.is_none() {
            let id = self.issue_id();
            self.current = Some(Path::new(id, format!("Path {}", id.ordinal()), self.style));
        }
        let Some(path) = self.current.as_mut() else {
            return Err(EditError::NotDrawing);
        };
        path.push_point(point);
        visuals::extend(&mut self.scene, path);
        Ok(path)
    }

    // Batch operations.

    /// Drops interior points within `tolerance` of their neighbours' segment.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidIndex`], or the errors of [`Simplify::execute`].
    pub fn simplify(&mut self, index: usize, tolerance: f64) -> Result<&Path, EditError> {
        let points = Simplify::new(tolerance).execute(self.checked(index)?.points())?;
        let before = self.paths[index].len();
        debug!(index, before, after = points.len(), "simplified path");
        Ok(self.replace_points(index, points))
    }

    /// Resamples the path along its Catmull-Rom curve.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidIndex`], or the errors of [`Smooth::execute`].
    pub fn smooth(&mut self, index: usize, segments: usize) -> Result<&Path, EditError> {
        let points = Smooth::new(segments).execute(self.checked(index)?.points())?;
        debug!(index, segments, after = points.len(), "smoothed path");
        Ok(self.replace_points(index, points))
    }

    /// Applies a scale, rotation or translation to one path.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidIndex`], or [`EditError::InvalidParameter`] for
    /// non-finite transform parameters.
    pub fn transform(&mut self, index: usize, kind: TransformKind) -> Result<&Path, EditError> {
        let points = kind.apply(self.checked(index)?.points())?;
        debug!(index, ?kind, "transformed path");
        Ok(self.replace_points(index, points))
    }

    /// Reverses the point order in place.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidIndex`].
    pub fn reverse(&mut self, index: usize) -> Result<&Path, EditError> {
        self.checked(index)?;
        let emphasized = self.is_highlighted(index);
        let path = &mut self.paths[index];
        path.reverse_points();
        visuals::rebuild(&mut self.scene, path, emphasized);
        Ok(path)
    }

    /// Joins the selected paths into one, replacing them.
    ///
    /// Repeated indices are ignored. The result keeps the style of the first
    /// selected path, gets a fresh id and is appended at the end of the
    /// collection; its index is returned.
    ///
    /// # Errors
    ///
    /// - [`EditError::InvalidIndex`] if any index is out of range.
    /// - [`EditError::InsufficientData`] for fewer than two distinct paths.
    pub fn stitch(&mut self, indices: &[usize], method: StitchMethod) -> Result<usize, EditError> {
        let mut seen = HashSet::new();
        let selected: Vec<usize> = indices.iter().copied().filter(|i| seen.insert(*i)).collect();
        for &index in &selected {
            self.checked(index)?;
        }
        if selected.len() < 2 {
            debug!(selected = selected.len(), "stitch needs at least two paths");
            return Err(EditError::InsufficientData {
                required: 2,
                actual: selected.len(),
            });
        }

        let inputs: Vec<&[Point3]> = selected.iter().map(|&i| self.paths[i].points()).collect();
        let points = Stitch::new(method).execute(&inputs)?;
        let style = *self.paths[selected[0]].style();

        let mut doomed = selected.clone();
        doomed.sort_unstable_by(|a, b| b.cmp(a));
        for index in doomed {
            self.remove_at(index);
        }

        let id = self.issue_id();
        let path = Path::with_points(id, format!("Stitched path {}", id.ordinal()), style, points);
        info!(
            id = %id,
            inputs = selected.len(),
            %method,
            points = path.len(),
            length = path.length(),
            "stitched paths"
        );
        Ok(self.push_committed(path))
    }

    /// Deep-copies a path under a fresh id and returns the copy's index.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidIndex`].
    pub fn duplicate(&mut self, index: usize) -> Result<usize, EditError> {
        let source = self.checked(index)?;
        let (name, style, points) = (
            format!("{} (copy)", source.name()),
            *source.style(),
            source.points().to_vec(),
        );
        let id = self.issue_id();
        debug!(index, id = %id, "duplicated path");
        Ok(self.push_committed(Path::with_points(id, name, style, points)))
    }

    /// Removes one path and its primitives.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidIndex`].
    pub fn delete_path(&mut self, index: usize) -> Result<(), EditError> {
        self.checked(index)?;
        let id = self.remove_at(index);
        info!(index, id = %id, "path deleted");
        Ok(())
    }

    /// Removes every committed path and the in-progress path.
    pub fn clear_all(&mut self) {
        let count = self.paths.len();
        for mut path in self.paths.drain(..) {
            path.visuals.release_all(&mut self.scene);
        }
        if let Some(mut path) = self.current.take() {
            path.visuals.release_all(&mut self.scene);
        }
        self.highlighted = None;
        info!(count, "cleared all paths");
    }

    /// Emphasizes one path and de-emphasizes all others.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidIndex`].
    pub fn highlight(&mut self, index: usize) -> Result<(), EditError> {
        let id = self.checked(index)?.id();
        self.highlighted = Some(id);
        self.refresh_emphasis();
        Ok(())
    }

    /// Returns every path to its normal presentation.
    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
        self.refresh_emphasis();
    }

    /// Merges `overrides` into the path's style and rebuilds its visuals.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidIndex`], or [`EditError::InvalidParameter`] for an
    /// opacity outside `[0, 1]` or a negative width or marker size.
    pub fn update_style(
        &mut self,
        index: usize,
        overrides: &StyleOverride,
    ) -> Result<&Path, EditError> {
        let style = self.checked(index)?.style().merged(overrides);
        style.validate()?;

        let emphasized = self.is_highlighted(index);
        let path = &mut self.paths[index];
        path.set_style(style);
        visuals::rebuild(&mut self.scene, path, emphasized);
        Ok(path)
    }

    /// Renames a path.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidIndex`].
    pub fn rename(&mut self, index: usize, name: impl Into<String>) -> Result<&Path, EditError> {
        self.checked(index)?;
        let path = &mut self.paths[index];
        path.set_name(name.into());
        Ok(path)
    }

    /// Sum of all committed path lengths.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.paths.iter().map(Path::length).sum()
    }

    #[must_use]
    pub fn statistics(&self) -> PathStatistics {
        PathStatistics::from_paths(&self.paths)
    }

    // Internals.

    fn checked(&self, index: usize) -> Result<&Path, EditError> {
        self.paths.get(index).ok_or_else(|| {
            debug!(index, len = self.paths.len(), "path index out of range");
            EditError::InvalidIndex {
                index,
                len: self.paths.len(),
            }
        })
    }

    fn issue_id(&mut self) -> PathId {
        let id = PathId(self.next_id);
        self.next_id += 1;
        id
    }

    fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.is_some_and(|id| self.paths[index].id() == id)
    }

    /// Swaps in a new point sequence and rebuilds visuals. `index` is valid.
    fn replace_points(&mut self, index: usize, points: Vec<Point3>) -> &Path {
        let emphasized = self.is_highlighted(index);
        let path = &mut self.paths[index];
        path.set_points(points);
        visuals::rebuild(&mut self.scene, path, emphasized);
        path
    }

    /// Builds visuals for a new committed path and appends it.
    fn push_committed(&mut self, mut path: Path) -> usize {
        visuals::rebuild(&mut self.scene, &mut path, false);
        self.paths.push(path);
        self.paths.len() - 1
    }

    /// Removes the path at a valid `index`, releasing its primitives.
    fn remove_at(&mut self, index: usize) -> PathId {
        let mut path = self.paths.remove(index);
        path.visuals.release_all(&mut self.scene);
        if self.highlighted == Some(path.id()) {
            self.highlighted = None;
        }
        path.id()
    }

    fn refresh_emphasis(&mut self) {
        for path in &self.paths {
            let emphasized = self.highlighted == Some(path.id());
            visuals::apply_emphasis(&mut self.scene, path, emphasized);
        }
    }
}

impl<S: Scene + Default> Default for PathEditor<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::distance_3d::polyline_length;
    use crate::scene::{PrimitiveKind, RecordingScene};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn editor() -> PathEditor<RecordingScene> {
        PathEditor::new(RecordingScene::new())
    }

    fn draw(editor: &mut PathEditor<RecordingScene>, points: &[Point3]) -> usize {
        editor.begin_drawing();
        for &pt in points {
            editor.add_point(pt).unwrap();
        }
        match editor.end_drawing() {
            DrawingOutcome::Committed(i) => i,
            other => panic!("expected commit, got {other:?}"),
        }
    }

    fn assert_length_invariant(editor: &PathEditor<RecordingScene>) {
        for path in editor.paths() {
            assert_relative_eq!(path.length(), polyline_length(path.points()), epsilon = 1e-9);
        }
    }

    #[test]
    fn draw_commit_then_simplify_colinear() {
        let mut ed = editor();
        let i = draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        assert_eq!(ed.path(i).unwrap().len(), 3);
        assert_relative_eq!(ed.path(i).unwrap().length(), 2.0);

        let path = ed.simplify(i, 0.01).unwrap();
        assert_eq!(path.len(), 2);
        assert_relative_eq!(path.length(), 2.0);
        assert_eq!(path.name(), "Path 1");
    }

    #[test]
    fn single_point_is_discarded() {
        let mut ed = editor();
        ed.begin_drawing();
        ed.add_point(p(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(ed.scene().live_count(), 1);

        assert_eq!(ed.end_drawing(), DrawingOutcome::Discarded);
        assert!(ed.is_empty());
        assert!(ed.current_path().is_none());
        assert_eq!(ed.scene().live_count(), 0);
    }

    #[test]
    fn add_point_outside_drawing_mode_fails() {
        let mut ed = editor();
        assert_eq!(ed.add_point(p(0.0, 0.0, 0.0)).unwrap_err(), EditError::NotDrawing);
        assert!(ed.current_path().is_none());
        assert_eq!(ed.end_drawing(), DrawingOutcome::Idle);
    }

    #[test]
    fn toggle_commits_like_end_drawing() {
        let mut ed = editor();
        assert!(ed.toggle_drawing());
        ed.add_point(p(0.0, 0.0, 0.0)).unwrap();
        ed.add_point(p(0.0, 3.0, 4.0)).unwrap();
        assert!(!ed.toggle_drawing());
        assert_eq!(ed.len(), 1);
        assert_relative_eq!(ed.total_distance(), 5.0);
    }

    #[test]
    fn in_progress_path_renders_strokes_after_two_points() {
        let mut ed = editor();
        ed.begin_drawing();
        ed.add_point(p(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(ed.scene().count_kind(PrimitiveKind::Tube), 0);
        ed.add_point(p(1.0, 0.0, 0.0)).unwrap();
        ed.add_point(p(2.0, 0.0, 0.0)).unwrap();
        assert_eq!(ed.scene().count_kind(PrimitiveKind::Marker), 3);
        assert_eq!(ed.scene().count_kind(PrimitiveKind::Tube), 1);
        assert_eq!(ed.scene().count_kind(PrimitiveKind::Line), 1);
    }

    #[test]
    fn invalid_index_leaves_state_unchanged() {
        let mut ed = editor();
        draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        let live = ed.scene().live_count();

        let invalid = EditError::InvalidIndex { index: 5, len: 1 };
        assert_eq!(ed.simplify(5, 0.1).unwrap_err(), invalid);
        assert_eq!(ed.smooth(5, 10).unwrap_err(), invalid);
        assert_eq!(ed.reverse(5).unwrap_err(), invalid);
        assert_eq!(ed.duplicate(5).unwrap_err(), invalid);
        assert_eq!(ed.delete_path(5).unwrap_err(), invalid);
        assert_eq!(ed.highlight(5).unwrap_err(), invalid);
        assert_eq!(ed.rename(5, "x").unwrap_err(), invalid);
        assert!(ed
            .transform(5, TransformKind::Translate { offset: Vector3::x() })
            .is_err());
        assert!(ed.stitch(&[0, 5], StitchMethod::Linear).is_err());

        assert_eq!(ed.len(), 1);
        assert_eq!(ed.scene().live_count(), live);
    }

    #[test]
    fn insufficient_data_is_a_no_op() {
        let mut ed = editor();
        let i = draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        let before = ed.scene().added();

        assert!(matches!(
            ed.simplify(i, 0.1),
            Err(EditError::InsufficientData { required: 3, actual: 2 })
        ));
        assert!(ed.smooth(i, 10).is_err());
        assert_eq!(ed.path(i).unwrap().len(), 2);
        assert_eq!(ed.scene().added(), before);
    }

    #[test]
    fn smooth_resamples_and_keeps_length_invariant() {
        let mut ed = editor();
        let i = draw(
            &mut ed,
            &[p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(2.0, 0.0, 0.0), p(3.0, 1.0, 0.0)],
        );
        let path = ed.smooth(i, 10).unwrap();
        assert_eq!(path.len(), 31);
        assert_eq!(path.points()[0], p(0.0, 0.0, 0.0));
        assert_eq!(path.points()[30], p(3.0, 1.0, 0.0));
        assert_length_invariant(&ed);
    }

    #[test]
    fn reverse_is_an_involution() {
        let mut ed = editor();
        let pts = [p(0.0, 0.0, 0.0), p(1.0, 2.0, 0.0), p(4.0, 2.0, 1.0)];
        let i = draw(&mut ed, &pts);
        let length = ed.path(i).unwrap().length();

        ed.reverse(i).unwrap();
        assert_eq!(ed.path(i).unwrap().points()[0], pts[2]);
        ed.reverse(i).unwrap();
        assert_eq!(ed.path(i).unwrap().points(), &pts);
        assert_relative_eq!(ed.path(i).unwrap().length(), length);
    }

    #[test]
    fn duplicate_is_independent() {
        let mut ed = editor();
        let i = draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)]);
        let copy = ed.duplicate(i).unwrap();

        assert_ne!(ed.path(i).unwrap().id(), ed.path(copy).unwrap().id());
        assert_eq!(ed.path(copy).unwrap().name(), "Path 1 (copy)");
        assert_eq!(ed.path(i).unwrap().points(), ed.path(copy).unwrap().points());
        assert_eq!(ed.path(i).unwrap().style(), ed.path(copy).unwrap().style());

        ed.transform(copy, TransformKind::Translate { offset: Vector3::new(0.0, 0.0, 5.0) })
            .unwrap();
        assert_eq!(ed.path(i).unwrap().points()[0], p(0.0, 0.0, 0.0));
        assert_eq!(ed.path(copy).unwrap().points()[0], p(0.0, 0.0, 5.0));
    }

    #[test]
    fn stitch_linear_joins_and_replaces() {
        let mut ed = editor();
        draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        draw(&mut ed, &[p(5.0, 0.0, 0.0), p(3.0, 0.0, 0.0)]);
        draw(&mut ed, &[p(9.0, 9.0, 9.0), p(9.0, 9.0, 8.0)]);

        let i = ed.stitch(&[0, 1, 0], StitchMethod::Linear).unwrap();
        assert_eq!(ed.len(), 2);
        assert_eq!(i, 1);

        let stitched = ed.path(i).unwrap();
        assert_eq!(stitched.name(), "Stitched path 4");
        // Second path is reversed because its end (3,0,0) is closer to (1,0,0).
        assert_eq!(
            stitched.points(),
            &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(5.0, 0.0, 0.0)]
        );
        // a.length + b.length + gap
        assert_relative_eq!(stitched.length(), 1.0 + 2.0 + 2.0);
        assert_eq!(ed.path(0).unwrap().points()[0], p(9.0, 9.0, 9.0));
        assert_length_invariant(&ed);
    }

    #[test]
    fn stitch_shortest_inserts_midpoint() {
        let mut ed = editor();
        draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        draw(&mut ed, &[p(3.0, 0.0, 0.0), p(4.0, 0.0, 0.0)]);
        let i = ed.stitch(&[0, 1], StitchMethod::default()).unwrap();
        let stitched = ed.path(i).unwrap();
        assert_eq!(stitched.len(), 5);
        assert_eq!(stitched.points()[2], p(2.0, 0.0, 0.0));
    }

    #[test]
    fn stitch_rejects_single_distinct_path() {
        let mut ed = editor();
        draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        assert_eq!(
            ed.stitch(&[0, 0], StitchMethod::Linear).unwrap_err(),
            EditError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
        assert_eq!(ed.len(), 1);
    }

    #[test]
    fn transforms_recompute_length() {
        let mut ed = editor();
        let i = draw(&mut ed, &[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);

        let path = ed
            .transform(i, TransformKind::Scale { factor: 2.0, center: None })
            .unwrap();
        assert_relative_eq!(path.length(), 4.0);
        assert_eq!(path.points()[0], p(-1.0, 0.0, 0.0));

        let path = ed
            .transform(
                i,
                TransformKind::Rotate {
                    angles: Vector3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2),
                    center: Some(Point3::origin()),
                },
            )
            .unwrap();
        assert_relative_eq!(path.points()[1].y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(path.length(), 4.0, epsilon = 1e-12);
        assert_length_invariant(&ed);
    }

    #[test]
    fn delete_and_clear_release_every_primitive() {
        let mut ed = editor();
        draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        draw(&mut ed, &[p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0), p(2.0, 1.0, 0.0)]);
        ed.smooth(1, 5).unwrap();
        ed.highlight(0).unwrap();

        ed.delete_path(0).unwrap();
        assert_eq!(ed.highlighted(), None);
        assert_eq!(ed.len(), 1);

        ed.begin_drawing();
        ed.add_point(p(7.0, 7.0, 7.0)).unwrap();
        ed.clear_all();
        assert!(ed.is_empty());
        assert!(ed.current_path().is_none());
        assert_eq!(ed.scene().live_count(), 0);
        assert_eq!(ed.scene().stale_requests(), 0);
        assert_eq!(ed.scene().added(), ed.scene().removed());
    }

    #[test]
    fn highlight_survives_rebuild() {
        let mut ed = editor();
        let a = draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)]);
        draw(&mut ed, &[p(0.0, 2.0, 0.0), p(1.0, 2.0, 0.0)]);
        ed.update_style(a, &StyleOverride {
            opacity: Some(0.5),
            ..StyleOverride::default()
        })
        .unwrap();
        ed.highlight(a).unwrap();

        let tube_opacity = |ed: &PathEditor<RecordingScene>, i: usize| {
            let handle = ed.path(i).unwrap().visuals.tube.unwrap();
            ed.scene().get(handle).unwrap().style.opacity
        };
        assert_relative_eq!(tube_opacity(&ed, a), 0.75);
        assert_relative_eq!(tube_opacity(&ed, 1), 1.0);

        ed.reverse(a).unwrap();
        assert_relative_eq!(tube_opacity(&ed, a), 0.75);

        ed.clear_highlight();
        assert_relative_eq!(tube_opacity(&ed, a), 0.5);
    }

    #[test]
    fn update_style_validates_and_hides_markers() {
        let mut ed = editor();
        let i = draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        assert!(ed
            .update_style(i, &StyleOverride {
                opacity: Some(2.0),
                ..StyleOverride::default()
            })
            .is_err());

        ed.update_style(i, &StyleOverride {
            show_markers: Some(false),
            ..StyleOverride::default()
        })
        .unwrap();
        assert_eq!(ed.scene().count_kind(PrimitiveKind::Marker), 0);
        assert_eq!(ed.scene().live_count(), 2);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut ed = editor();
        let first = draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        let id = ed.path(first).unwrap().id();
        ed.delete_path(first).unwrap();
        let second = draw(&mut ed, &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]);
        assert!(ed.path(second).unwrap().id() > id);
        assert_eq!(ed.path(second).unwrap().name(), "Path 2");
    }

    #[test]
    fn drawing_plane_rejects_zero_normal() {
        let mut ed = editor();
        assert!(ed.set_drawing_plane(Vector3::zeros(), Point3::origin()).is_err());
        ed.set_drawing_plane(Vector3::z(), Point3::new(0.0, 0.0, 2.0)).unwrap();
        assert_relative_eq!(ed.drawing_plane().normal().z, 1.0);
    }
}
