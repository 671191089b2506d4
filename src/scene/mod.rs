//! Boundary to the external rendering layer.
//!
//! The engine never reads from the scene. It only issues add, update and
//! remove requests, and every handle it receives is eventually removed again.

mod recording;

pub use recording::{Primitive, RecordingScene};

use crate::math::Point3;
use crate::path::LineType;

slotmap::new_key_type! {
    /// Opaque handle to a drawable primitive owned by the scene.
    pub struct PrimitiveHandle;
}

/// What a primitive represents for the path it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Sphere marking a single anchor point.
    Marker,
    /// Swept tube along the path's interpolating curve.
    Tube,
    /// Thin polyline through the raw anchor points.
    Line,
}

/// Geometry payload of a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveGeometry {
    Sphere {
        center: Point3,
        radius: f64,
    },
    /// The scene sweeps a circle of `radius` along a Catmull-Rom curve through
    /// `points`, sampled at `tubular_segments` steps.
    Tube {
        points: Vec<Point3>,
        radius: f64,
        tubular_segments: usize,
        radial_segments: usize,
    },
    Polyline {
        points: Vec<Point3>,
    },
}

/// Material payload of a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveStyle {
    /// `0xRRGGBB`.
    pub color: u32,
    pub opacity: f64,
    pub line_width: f64,
    pub line_type: LineType,
}

/// The drawing surface the editor renders into.
pub trait Scene {
    /// Adds a primitive and returns the handle that must later be removed.
    fn add_primitive(
        &mut self,
        kind: PrimitiveKind,
        geometry: PrimitiveGeometry,
        style: PrimitiveStyle,
    ) -> PrimitiveHandle;

    /// Removes a primitive and releases its resources.
    fn remove_primitive(&mut self, handle: PrimitiveHandle);

    /// Replaces the material of a live primitive.
    fn update_style(&mut self, handle: PrimitiveHandle, style: PrimitiveStyle);

    /// Replaces the geometry of a live primitive.
    fn update_geometry(&mut self, handle: PrimitiveHandle, geometry: PrimitiveGeometry);
}

/// Handles owned by one path.
#[derive(Debug, Default)]
pub struct PathVisuals {
    pub markers: Vec<PrimitiveHandle>,
    pub tube: Option<PrimitiveHandle>,
    pub line: Option<PrimitiveHandle>,
}

impl PathVisuals {
    /// Whether the path currently owns no primitives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.tube.is_none() && self.line.is_none()
    }

    /// Removes every owned primitive from `scene`.
    pub fn release_all<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        for handle in self.markers.drain(..) {
            scene.remove_primitive(handle);
        }
        self.release_strokes(scene);
    }

    /// Removes only the tube and line, keeping point markers.
    pub fn release_strokes<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if let Some(handle) = self.tube.take() {
            scene.remove_primitive(handle);
        }
        if let Some(handle) = self.line.take() {
            scene.remove_primitive(handle);
        }
    }
}
