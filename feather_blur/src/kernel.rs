use std::fmt;

use num_traits::AsPrimitive;

use crate::{geometry::Point, Float};

/// Isotropic 2D Gaussian density centered on `(mean, mean)`.
pub fn gaussian<S: Float>(x: S, y: S, sigma: S, mean: S) -> S {
    let dx = (x - mean) / sigma;
    let dy = (y - mean) / sigma;
    (-S::HALF * (dx * dx + dy * dy)).exp() / (S::TWO * S::PI * sigma * sigma)
}

/// Square, odd sized convolution matrix stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel<S> {
    values: Vec<S>,
    size: usize,
}

impl<S> Kernel<S> {
    fn check_size(size: usize) -> Result<(), Error> {
        if size % 2 == 1 {
            Ok(())
        } else {
            Err(Error::InvalidKernelSize(size))
        }
    }

    /// Wraps row-major `values` as a `size` x `size` kernel.
    pub fn from_raw(values: Vec<S>, size: usize) -> Result<Self, Error> {
        Self::check_size(size)?;
        if values.len() != size * size {
            return Err(Error::Length {
                len: values.len(),
                size,
            });
        }
        Ok(Self { values, size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center cell to the kernel edge.
    pub fn margin(&self) -> usize {
        (self.size - 1) / 2
    }

    pub fn values(&self) -> &[S] {
        &self.values
    }

    /// Weight at `point.y` rows and `point.x` columns from the top left cell.
    pub fn get(&self, point: Point<usize>) -> Option<&S> {
        if point.x < self.size && point.y < self.size {
            self.values.get(point.y * self.size + point.x)
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[S]> + '_ {
        self.values.chunks_exact(self.size)
    }
}

impl<S: Float> Kernel<S> {
    /// Samples the Gaussian density on every cell, peaking at `size / 2`.
    ///
    /// The kernel is returned as is together with the sum of its values, leaving
    /// normalisation to the caller.
    pub fn gaussian(size: usize, sigma: S) -> Result<(Self, S), Error>
    where
        usize: AsPrimitive<S>,
    {
        Self::check_size(size)?;
        let mean: S = (size / 2).as_();
        let mut sum = S::ZERO;
        let mut values = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let value = gaussian(x.as_(), y.as_(), sigma, mean);
                sum += value;
                values.push(value);
            }
        }
        Ok((Self { values, size }, sum))
    }

    /// Gaussian kernel whose values add up to one.
    ///
    /// `sigma` must be strictly positive and large enough for the density not to
    /// underflow to zero on every cell.
    pub fn normalised_gaussian(size: usize, sigma: S) -> Result<Self, Error>
    where
        usize: AsPrimitive<S>,
    {
        let (mut kernel, sum) = Self::gaussian(size, sigma)?;
        kernel.normalise(sum);
        Ok(kernel)
    }

    /// Kernel that leaves the sampled pixel untouched.
    pub fn identity(size: usize) -> Result<Self, Error> {
        Self::check_size(size)?;
        let mut values = vec![S::ZERO; size * size];
        let center = size / 2;
        values[center * size + center] = S::ONE;
        Ok(Self { values, size })
    }

    pub fn sum(&self) -> S {
        self.values.iter().fold(S::ZERO, |acc, &value| acc + value)
    }

    /// Divides every value by `sum`, which must not be zero.
    pub fn normalise(&mut self, sum: S) {
        for value in self.values.iter_mut() {
            *value /= sum;
        }
    }

    /// Writes `a * (1 - weight) + b * weight` into `out`.
    ///
    /// `weight` is not clamped: values outside `[0, 1]` extrapolate.
    pub fn interpolate(weight: S, a: &Self, b: &Self, out: &mut Self) -> Result<(), Error> {
        if a.size != b.size {
            return Err(Error::ShapeMismatch(a.size, b.size));
        }
        if a.size != out.size {
            return Err(Error::ShapeMismatch(a.size, out.size));
        }
        let rest = S::ONE - weight;
        for ((out, &a), &b) in out.values.iter_mut().zip(&a.values).zip(&b.values) {
            *out = a * rest + b * weight;
        }
        Ok(())
    }
}

impl<S: fmt::Display> fmt::Display for Kernel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for value in row {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                write!(f, "{:.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Kernel size ({0}) must be odd-numbered.")]
    InvalidKernelSize(usize),
    #[error("Kernel sizes do not match ({0} != {1}).")]
    ShapeMismatch(usize, usize),
    #[error("{len} values can not fill a {size}x{size} kernel.")]
    Length { len: usize, size: usize },
}
