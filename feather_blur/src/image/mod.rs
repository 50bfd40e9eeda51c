use std::ops::Deref;

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

use crate::{geometry::Point, Grid};

pub mod fit;
pub mod region;
pub mod scale;

pub use fit::fit;
pub use region::{extract, integrate};
pub use scale::scale;

/// Row-major buffer of `width * height` pixels made of `components` interleaved values.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelData<T> {
    pixels: Vec<T>,
    grid: Grid,
    components: usize,
}

impl<T> PixelData<T> {
    pub fn from_raw(pixels: Vec<T>, grid: Grid, components: usize) -> Result<Self, Error> {
        let expected = grid.len() * components;
        if pixels.len() != expected {
            return Err(Error::BufferSize {
                len: pixels.len(),
                expected,
            });
        }
        Ok(Self {
            pixels,
            grid,
            components,
        })
    }

    /// Builds every pixel from its position; all of its components share the value.
    pub fn new(mut builder: impl FnMut(Point<usize>) -> T, grid: Grid, components: usize) -> Self
    where
        T: Clone,
    {
        let mut pixels = Vec::with_capacity(grid.len() * components);
        for y in 0..grid.height {
            for x in 0..grid.width {
                let value = builder(Point { x, y });
                pixels.extend(std::iter::repeat(value).take(components));
            }
        }
        Self {
            pixels,
            grid,
            components,
        }
    }

    pub fn filled(value: T, grid: Grid, components: usize) -> Self
    where
        T: Clone,
    {
        Self {
            pixels: vec![value; grid.len() * components],
            grid,
            components,
        }
    }

    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [T] {
        &mut self.pixels
    }

    pub fn into_raw(self) -> Vec<T> {
        self.pixels
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn components(&self) -> usize {
        self.components
    }

    /// Whether both buffers describe the same pixel layout.
    pub fn same_shape<U>(&self, other: &PixelData<U>) -> bool {
        self.grid == other.grid && self.components == other.components
    }

    /// Index of the first component of the pixel at `point`.
    pub fn offset_of(&self, point: Point<usize>) -> Option<usize> {
        self.grid.index_of(point).map(|index| index * self.components)
    }

    pub fn pixel(&self, point: Point<usize>) -> Option<&[T]> {
        let offset = self.offset_of(point)?;
        Some(&self.pixels[offset..offset + self.components])
    }

    pub fn pixel_mut(&mut self, point: Point<usize>) -> Option<&mut [T]> {
        let offset = self.offset_of(point)?;
        Some(&mut self.pixels[offset..offset + self.components])
    }

    /// Values of `len` consecutive pixels starting at `point`; the run must stay in its row.
    pub fn span(&self, point: Point<usize>, len: usize) -> &[T] {
        let start = self.grid.index_of_unchecked(point) * self.components;
        &self.pixels[start..start + len * self.components]
    }

    pub fn span_mut(&mut self, point: Point<usize>, len: usize) -> &mut [T] {
        let start = self.grid.index_of_unchecked(point) * self.components;
        &mut self.pixels[start..start + len * self.components]
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> PixelData<U> {
        PixelData {
            pixels: self.pixels.iter().map(f).collect(),
            grid: self.grid,
            components: self.components,
        }
    }
}

impl<T> Deref for PixelData<T> {
    type Target = Grid;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}

impl From<DynamicImage> for PixelData<u8> {
    fn from(value: DynamicImage) -> Self {
        let grid = Grid {
            height: value.height() as usize,
            width: value.width() as usize,
        };
        let (pixels, components) = match value {
            DynamicImage::ImageLuma8(image) => (image.into_raw(), 1),
            DynamicImage::ImageLumaA8(image) => (image.into_raw(), 2),
            DynamicImage::ImageRgb8(image) => (image.into_raw(), 3),
            DynamicImage::ImageRgba8(image) => (image.into_raw(), 4),
            other if other.color().has_alpha() => (other.to_rgba8().into_raw(), 4),
            other => (other.to_rgb8().into_raw(), 3),
        };
        Self {
            pixels,
            grid,
            components,
        }
    }
}

impl TryFrom<PixelData<u8>> for DynamicImage {
    type Error = Error;

    fn try_from(value: PixelData<u8>) -> Result<Self, Self::Error> {
        let PixelData {
            pixels,
            grid,
            components,
        } = value;
        let (width, height) = (grid.width as u32, grid.height as u32);
        let len = pixels.len();
        let image = match components {
            1 => GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8),
            2 => GrayAlphaImage::from_raw(width, height, pixels).map(DynamicImage::ImageLumaA8),
            3 => RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8),
            other => return Err(Error::UnsupportedComponents(other)),
        };
        image.ok_or(Error::BufferSize {
            len,
            expected: grid.len() * components,
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Pixel buffer holds {len} values, {expected} were expected.")]
    BufferSize { len: usize, expected: usize },
    #[error("Images with {0} components are not supported.")]
    UnsupportedComponents(usize),
}
