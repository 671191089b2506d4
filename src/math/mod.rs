pub mod aabb;
pub mod distance_3d;
pub mod intersect_3d;
pub mod ray;

pub use aabb::Aabb;
pub use ray::Ray;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance used when comparing accumulated path lengths.
pub const LENGTH_TOLERANCE: f64 = 1e-6;
