//! Path authoring on 3D point clouds.
//!
//! Pointer input is turned into 3D anchors by [`resolver::resolve`], anchors
//! are collected into polylines by [`PathEditor`], and the editor keeps an
//! external [`Scene`](scene::Scene) in sync with the paths it owns.

pub mod cloud;
pub mod config;
pub mod editor;
pub mod error;
pub mod feedback;
pub mod geometry;
pub mod io;
pub mod math;
pub mod operations;
pub mod path;
pub mod resolver;
pub mod scene;
pub mod stats;

pub use cloud::PointCloud;
pub use config::EngineConfig;
pub use editor::{DrawingOutcome, PathEditor};
pub use error::{CloudPathError, Result};
pub use path::{Path, PathId, PathStyle, Point};
