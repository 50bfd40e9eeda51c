pub mod geometry {
    pub mod point;

    pub use point::Point;
}

pub mod convolve;
mod float;
pub mod grid;
pub mod image;
pub mod kernel;
pub mod rect;
pub mod verboser;

pub use convolve::{convolve, convolve_masked, FeatherBlur};
pub use float::Float;
pub use grid::Grid;
pub use crate::image::PixelData;
pub use kernel::Kernel;
pub use rect::Rect;
