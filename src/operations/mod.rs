//! Pure point-sequence algorithms used by the editor's batch operations.
//!
//! Every operation takes the current points by reference and returns a fresh
//! sequence; the caller swaps it in, so a failed operation never leaves a
//! half-edited path behind.

pub mod modification;
pub mod transform;

pub use modification::{catmull_rom, Simplify, Smooth, Stitch, StitchMethod};
pub use transform::{GeneralTransform, Rotate, Scale, TransformKind, Translate};
