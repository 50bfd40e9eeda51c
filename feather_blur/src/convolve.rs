//! Sliding window convolution over interleaved 8-bit pixel buffers.
//!
//! Every output component is the weighted sum of the `size` x `size` window of source
//! components centered on the pixel:
//!
//! ```text
//!   kernel          sample
//!  ___________     ___________
//! |k  |   |   |   |s  |   |   |
//! |___|___|___|   |___|___|___|
//! |   |   |   |   |   |px |   |
//! |___|___|___|   |___|___|___|
//! |   |   |   |   |   |   |   |
//! |___|___|___|   |___|___|___|
//! ```
//!
//! Samples falling outside the image repeat the nearest edge pixel.

use num_traits::AsPrimitive;

use crate::{
    geometry::Point,
    image::PixelData,
    kernel::{self, Kernel},
    rect::Rect,
    verboser::{Message, Verboser},
    Float,
};

/// Blurs inside a rectangle with a strength fading radially from its center.
#[derive(Clone, Debug)]
pub struct FeatherBlur<S> {
    blur: Kernel<S>,
    identity: Kernel<S>,
}

impl<S: Float> FeatherBlur<S> {
    pub fn new(blur: Kernel<S>, verboser: &mut impl Verboser) -> Result<Self, Error> {
        let identity = Kernel::identity(blur.size())?;
        verboser.verbose(Message::BuildingKernel(blur.size()));
        Ok(Self { blur, identity })
    }

    pub fn gaussian(size: usize, sigma: S, verboser: &mut impl Verboser) -> Result<Self, Error>
    where
        usize: AsPrimitive<S>,
    {
        Self::new(Kernel::normalised_gaussian(size, sigma)?, verboser)
    }

    pub fn kernel(&self) -> &Kernel<S> {
        &self.blur
    }

    pub fn apply(
        &self,
        source: &PixelData<u8>,
        rect: Rect,
        verboser: &mut impl Verboser,
    ) -> Result<PixelData<u8>, Error>
    where
        u8: AsPrimitive<S>,
        usize: AsPrimitive<S>,
    {
        let mut dest = PixelData::filled(0, *source.grid(), source.components());
        convolve_masked(source, &mut dest, rect, &self.blur, &self.identity, verboser)?;
        Ok(dest)
    }
}

/// Writes into `dest` the spatially variant blur of `source`.
///
/// Pixels outside `rect` are copied as they are. Inside it, each pixel is convolved
/// with `identity` blended towards `blur` by [`Rect::radial_weight`].
pub fn convolve_masked<S: Float>(
    source: &PixelData<u8>,
    dest: &mut PixelData<u8>,
    rect: Rect,
    blur: &Kernel<S>,
    identity: &Kernel<S>,
    verboser: &mut impl Verboser,
) -> Result<(), Error>
where
    u8: AsPrimitive<S>,
    usize: AsPrimitive<S>,
{
    check_buffers(source, dest)?;
    if blur.size() != identity.size() {
        return Err(kernel::Error::ShapeMismatch(identity.size(), blur.size()).into());
    }
    let mut scratch = identity.clone();
    let components = source.components();

    for y in 0..source.height {
        verboser.verbose(Message::Convolving(y, source.height));
        for x in 0..source.width {
            let point = Point { x, y };
            if rect.contains(point) {
                Kernel::interpolate(rect.radial_weight(point), identity, blur, &mut scratch)?;
                apply_kernel(source, dest, point, &scratch, S::ONE);
            } else {
                let offset = source.grid().index_of_unchecked(point) * components;
                dest.pixels_mut()[offset..offset + components]
                    .copy_from_slice(&source.pixels()[offset..offset + components]);
            }
        }
    }
    verboser.verbose(Message::Convolving(source.height, source.height));
    Ok(())
}

/// Writes into `dest` the convolution of every pixel of `source` with `kernel`.
///
/// Results are divided by the kernel sum, unless it is zero.
pub fn convolve<S: Float>(
    source: &PixelData<u8>,
    dest: &mut PixelData<u8>,
    kernel: &Kernel<S>,
    verboser: &mut impl Verboser,
) -> Result<(), Error>
where
    u8: AsPrimitive<S>,
{
    check_buffers(source, dest)?;
    let sum = kernel.sum();
    let scale = if sum == S::ZERO { S::ONE } else { S::ONE / sum };

    for y in 0..source.height {
        verboser.verbose(Message::Convolving(y, source.height));
        for x in 0..source.width {
            apply_kernel(source, dest, Point { x, y }, kernel, scale);
        }
    }
    verboser.verbose(Message::Convolving(source.height, source.height));
    Ok(())
}

fn check_buffers(source: &PixelData<u8>, dest: &PixelData<u8>) -> Result<(), Error> {
    if source.same_shape(dest) {
        Ok(())
    } else {
        Err(Error::BufferShape)
    }
}

fn apply_kernel<S: Float>(
    source: &PixelData<u8>,
    dest: &mut PixelData<u8>,
    point: Point<usize>,
    kernel: &Kernel<S>,
    scale: S,
) where
    u8: AsPrimitive<S>,
{
    let margin = kernel.margin();
    let components = source.components();
    let offset = source.grid().index_of_unchecked(point) * components;

    for component in 0..components {
        let mut sum = S::ZERO;
        for (row, weights) in kernel.rows().enumerate() {
            for (col, &weight) in weights.iter().enumerate() {
                let sample = source.clamped_sample(point, Point { x: col, y: row }, margin);
                let index = source.grid().index_of_unchecked(sample) * components + component;
                sum += weight * source.pixels()[index].as_();
            }
        }
        dest.pixels_mut()[offset + component] = to_byte(sum * scale);
    }
}

fn to_byte<S: Float>(value: S) -> u8 {
    value.round().max(S::ZERO).min(S::TWO_FIVE_FIVE).as_()
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Kernel(#[from] kernel::Error),
    #[error("Source and destination buffers differ in shape.")]
    BufferShape,
}
