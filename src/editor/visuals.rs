//! Scene primitives owned by a path.
//!
//! Every path renders as one marker sphere per anchor (when markers are shown),
//! a tube swept along its interpolating curve and a faint polyline through the
//! raw anchors used as a selection aid. All handles live in the path's
//! [`PathVisuals`](crate::scene::PathVisuals) and are released before a rebuild.

use crate::path::{Path, PathStyle};
use crate::scene::{PrimitiveGeometry, PrimitiveKind, PrimitiveStyle, Scene};

/// Tube radius per unit of `line_width`.
const TUBE_RADIUS_SCALE: f64 = 0.01;
const MIN_TUBULAR_SEGMENTS: usize = 50;
const TUBULAR_SEGMENTS_PER_POINT: usize = 10;
const RADIAL_SEGMENTS: usize = 8;

/// Selection line opacity relative to the path opacity.
const LINE_OPACITY: f64 = 0.1;
const EMPHASIS_TUBE_OPACITY: f64 = 1.5;
const EMPHASIS_LINE_OPACITY: f64 = 0.3;

/// Drops every primitive of `path` and builds them again from its points.
pub(crate) fn rebuild<S: Scene + ?Sized>(scene: &mut S, path: &mut Path, emphasized: bool) {
    path.visuals.release_all(scene);

    if path.style().show_markers {
        let markers = path
            .points()
            .iter()
            .map(|&center| add_marker(scene, path.style(), center))
            .collect();
        path.visuals.markers = markers;
    }

    rebuild_strokes(scene, path, emphasized);
}

/// Adds the marker for the newest anchor and refreshes the strokes.
pub(crate) fn extend<S: Scene + ?Sized>(scene: &mut S, path: &mut Path) {
    if path.style().show_markers {
        if let Some(&center) = path.points().last() {
            let handle = add_marker(scene, path.style(), center);
            path.visuals.markers.push(handle);
        }
    }
    rebuild_strokes(scene, path, false);
}

/// Re-applies tube and line opacities for the emphasized or normal state.
pub(crate) fn apply_emphasis<S: Scene + ?Sized>(scene: &mut S, path: &Path, emphasized: bool) {
    let style = path.style();
    if let Some(tube) = path.visuals.tube {
        scene.update_style(tube, tube_style(style, emphasized));
    }
    if let Some(line) = path.visuals.line {
        scene.update_style(line, line_style(style, emphasized));
    }
}

fn rebuild_strokes<S: Scene + ?Sized>(scene: &mut S, path: &mut Path, emphasized: bool) {
    path.visuals.release_strokes(scene);
    if !path.is_complete() {
        return;
    }

    let points = path.points().to_vec();
    let style = *path.style();

    path.visuals.tube = Some(scene.add_primitive(
        PrimitiveKind::Tube,
        PrimitiveGeometry::Tube {
            tubular_segments: MIN_TUBULAR_SEGMENTS
                .max(points.len() * TUBULAR_SEGMENTS_PER_POINT),
            radius: style.line_width * TUBE_RADIUS_SCALE,
            radial_segments: RADIAL_SEGMENTS,
            points: points.clone(),
        },
        tube_style(&style, emphasized),
    ));
    path.visuals.line = Some(scene.add_primitive(
        PrimitiveKind::Line,
        PrimitiveGeometry::Polyline { points },
        line_style(&style, emphasized),
    ));
}

fn add_marker<S: Scene + ?Sized>(
    scene: &mut S,
    style: &PathStyle,
    center: crate::math::Point3,
) -> crate::scene::PrimitiveHandle {
    scene.add_primitive(
        PrimitiveKind::Marker,
        PrimitiveGeometry::Sphere {
            center,
            radius: style.marker_size,
        },
        PrimitiveStyle {
            color: style.color,
            opacity: style.opacity,
            line_width: style.line_width,
            line_type: style.line_type,
        },
    )
}

fn tube_style(style: &PathStyle, emphasized: bool) -> PrimitiveStyle {
    let opacity = if emphasized {
        (style.opacity * EMPHASIS_TUBE_OPACITY).min(1.0)
    } else {
        style.opacity
    };
    PrimitiveStyle {
        color: style.color,
        opacity,
        line_width: style.line_width,
        line_type: style.line_type,
    }
}

fn line_style(style: &PathStyle, emphasized: bool) -> PrimitiveStyle {
    let opacity = if emphasized {
        (style.opacity * EMPHASIS_LINE_OPACITY).min(1.0)
    } else {
        style.opacity * LINE_OPACITY
    };
    PrimitiveStyle {
        color: style.color,
        opacity,
        line_width: style.line_width,
        line_type: style.line_type,
    }
}
