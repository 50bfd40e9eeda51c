use crate::{
    geometry::Point,
    verboser::{Message, Verboser},
    Grid,
};

use super::PixelData;

/// Nearest neighbour upscale: every pixel becomes a `factor` x `factor` block.
pub fn scale<T: Copy>(
    factor: usize,
    source: &PixelData<T>,
    verboser: &mut impl Verboser,
) -> Result<PixelData<T>, Error> {
    match factor {
        0 => Err(Error),
        1 => Ok(source.clone()),
        _ => {
            verboser.verbose(Message::Scaling(factor));
            let grid = Grid {
                height: source.height * factor,
                width: source.width * factor,
            };
            let components = source.components();
            let mut pixels = Vec::with_capacity(grid.len() * components);
            for y in 0..grid.height {
                for x in 0..grid.width {
                    let point = Point { x: x / factor, y: y / factor };
                    pixels.extend_from_slice(source.span(point, 1));
                }
            }
            Ok(PixelData {
                pixels,
                grid,
                components,
            })
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Scale factor must be positive.")]
pub struct Error;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verboser::Silent;

    #[test]
    fn factor_one_copies() {
        let source = PixelData::new(|p| (p.x * 3 + p.y) as u8, Grid::new(4, 5), 3);
        assert_eq!(scale(1, &source, &mut Silent).unwrap(), source);
    }

    #[test]
    fn factor_zero_is_rejected() {
        let source = PixelData::filled(0u8, Grid::new(1, 1), 1);
        assert_eq!(scale(0, &source, &mut Silent), Err(Error));
    }

    #[test]
    fn pixels_are_replicated_in_blocks() {
        let source = PixelData::from_raw(vec![1u8, 2, 3, 4, 5, 6], Grid::new(1, 3), 2).unwrap();
        let scaled = scale(2, &source, &mut Silent).unwrap();
        assert_eq!(*scaled.grid(), Grid::new(2, 6));
        assert_eq!(scaled.components(), 2);
        let row = [1u8, 2, 1, 2, 3, 4, 3, 4, 5, 6, 5, 6];
        assert_eq!(&scaled.pixels()[..12], &row);
        assert_eq!(&scaled.pixels()[12..], &row);
    }
}
