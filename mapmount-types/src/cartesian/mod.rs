//! Types in screen (pixel) space.

mod size;

pub use size::Size;
