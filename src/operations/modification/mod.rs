mod simplify;
mod smooth;
mod stitch;

pub use simplify::Simplify;
pub use smooth::{catmull_rom, Smooth};
pub use stitch::{Stitch, StitchMethod};
