use num_traits::AsPrimitive;

use crate::{geometry::Point, image::PixelData, Float, Grid};

/// Area where the blur is applied, bounds included.
///
/// The blur strength is driven by the width of the rectangle only, so the falloff is a
/// circle inscribed in it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub min: Point<usize>,
    pub max: Point<usize>,
}

impl Rect {
    pub const fn new(min: Point<usize>, max: Point<usize>) -> Self {
        Self { min, max }
    }

    pub fn square(origin: Point<usize>, size: usize) -> Self {
        Self {
            min: origin,
            max: Point {
                x: origin.x + size,
                y: origin.y + size,
            },
        }
    }

    /// Moves the origin onto the last pixel of `grid` when it lies past it, keeping the size.
    pub fn clamp_to(self, grid: Grid) -> Self {
        let origin = Point {
            x: self.min.x.min(grid.width.saturating_sub(1)),
            y: self.min.y.min(grid.height.saturating_sub(1)),
        };
        Self {
            min: origin,
            max: Point {
                x: origin.x + self.max.x.saturating_sub(self.min.x),
                y: origin.y + self.max.y.saturating_sub(self.min.y),
            },
        }
    }

    pub fn contains(&self, point: Point<usize>) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn area_size(&self) -> usize {
        self.max.x.saturating_sub(self.min.x)
    }

    pub fn area_center(&self) -> usize {
        self.area_size() / 2
    }

    /// Size of the part of the rectangle covering `grid`, or `None` when they do not meet.
    pub fn visible_in(&self, grid: Grid) -> Option<Grid> {
        if !grid.contains(self.min) {
            return None;
        }
        Some(Grid {
            width: self.max.x.min(grid.width - 1) - self.min.x + 1,
            height: self.max.y.min(grid.height - 1) - self.min.y + 1,
        })
    }

    /// Blend factor for `point`: one at the center, fading linearly with the distance
    /// to zero at half the rectangle width and beyond.
    pub fn radial_weight<S: Float>(&self, point: Point<usize>) -> S
    where
        usize: AsPrimitive<S>,
    {
        let size = self.area_size();
        if size == 0 {
            return S::ZERO;
        }
        let center: Point<S> = Point::new(self.area_center(), self.area_center()).as_();
        let local = point.as_::<S>() - self.min.as_::<S>();
        let ratio = S::TWO * local.distance(&center) / size.as_();
        (S::ONE - ratio).max(S::ZERO)
    }
}

/// Single channel `size` x `size` map of the radial weight over a square of that size.
pub fn ramp<S: Float>(size: usize) -> PixelData<S>
where
    usize: AsPrimitive<S>,
{
    let rect = Rect::square(Point::default(), size.saturating_sub(1));
    PixelData::new(|point| rect.radial_weight(point), Grid::new(size, size), 1)
}
