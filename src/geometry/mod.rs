pub mod camera;
pub mod plane;

pub use camera::{Camera, Ndc, Projection, Viewport};
pub use plane::{Plane, PlaneConfig};
