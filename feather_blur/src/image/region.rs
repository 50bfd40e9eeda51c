//! Cropping a block out of a buffer and pasting it back.
//!
//! ```text
//!  ______________
//! |    ___       |  extract     ___
//! |   |_|_|----------------->  |_|_|
//! |   |_|_|<-----------------  |_|_|
//! |______________|  integrate
//! ```

use crate::{
    geometry::Point,
    verboser::{Message, Verboser},
    Grid,
};

use super::PixelData;

/// Copies the `size` block whose top left corner is `origin` into a new buffer.
pub fn extract<T: Copy>(
    source: &PixelData<T>,
    origin: Point<usize>,
    size: Grid,
    verboser: &mut impl Verboser,
) -> Result<PixelData<T>, Error> {
    if !source.fits(origin, size) {
        return Err(Error::out_of_bounds(origin, size, *source.grid()));
    }
    verboser.verbose(Message::Extracting(size));
    let mut pixels = Vec::with_capacity(size.len() * source.components());
    for y in 0..size.height {
        pixels.extend_from_slice(source.span(origin + Point { x: 0, y }, size.width));
    }
    Ok(PixelData {
        pixels,
        grid: size,
        components: source.components(),
    })
}

/// Pastes `chunk` into `dest` with its top left corner at `origin`.
pub fn integrate<T: Copy>(
    chunk: &PixelData<T>,
    dest: &mut PixelData<T>,
    origin: Point<usize>,
    verboser: &mut impl Verboser,
) -> Result<(), Error> {
    if chunk.components() != dest.components() {
        return Err(Error::Components(chunk.components(), dest.components()));
    }
    if !dest.fits(origin, *chunk.grid()) {
        return Err(Error::out_of_bounds(origin, *chunk.grid(), *dest.grid()));
    }
    verboser.verbose(Message::Integrating(*chunk.grid()));
    for y in 0..chunk.height {
        let row = Point { x: 0, y };
        dest.span_mut(origin + row, chunk.width)
            .copy_from_slice(chunk.span(row, chunk.width));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Region of {width}x{height} at {origin} does not fit in {bounds_width}x{bounds_height}.")]
    RegionOutOfBounds {
        origin: Point<usize>,
        width: usize,
        height: usize,
        bounds_width: usize,
        bounds_height: usize,
    },
    #[error("Region has {0} components but the buffer has {1}.")]
    Components(usize, usize),
}

impl Error {
    fn out_of_bounds(origin: Point<usize>, size: Grid, bounds: Grid) -> Self {
        Self::RegionOutOfBounds {
            origin,
            width: size.width,
            height: size.height,
            bounds_width: bounds.width,
            bounds_height: bounds.height,
        }
    }
}
