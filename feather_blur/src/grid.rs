use crate::geometry::Point;

/// Pixel dimensions of a buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid<T = usize> {
    pub height: T,
    pub width: T,
}

impl<T> Grid<T> {
    pub fn new(height: T, width: T) -> Self {
        Self { height, width }
    }
}

impl Grid {
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, point: Point<usize>) -> bool {
        point.x < self.width && point.y < self.height
    }

    pub fn index_of(&self, point: Point<usize>) -> Option<usize> {
        if self.contains(point) {
            Some(point.y * self.width + point.x)
        } else {
            None
        }
    }

    /// Caller must ensure `point` lies inside the grid.
    pub fn index_of_unchecked(&self, point: Point<usize>) -> usize {
        point.y * self.width + point.x
    }

    /// Whether a `size` sized block placed at `origin` fits completely inside the grid.
    pub fn fits(&self, origin: Point<usize>, size: Grid) -> bool {
        origin.x + size.width <= self.width && origin.y + size.height <= self.height
    }

    /// Position of the window sample `offset` cells away from the top left corner of a
    /// `2 * margin + 1` window centered on `center`, clamped to the nearest edge pixel.
    pub fn clamped_sample(&self, center: Point<usize>, offset: Point<usize>, margin: usize) -> Point<usize> {
        Point {
            x: (center.x + offset.x)
                .saturating_sub(margin)
                .min(self.width.saturating_sub(1)),
            y: (center.y + offset.y)
                .saturating_sub(margin)
                .min(self.height.saturating_sub(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_rejects_outside_points() {
        let grid = Grid::new(4, 5);
        assert_eq!(grid.index_of(Point::new(4, 3)), Some(19));
        assert_eq!(grid.index_of(Point::new(5, 0)), None);
        assert_eq!(grid.index_of(Point::new(0, 4)), None);
    }

    #[test]
    fn clamped_sample_replicates_edges() {
        let grid = Grid::new(10, 10);
        let margin = 2;
        assert_eq!(
            grid.clamped_sample(Point::new(0, 0), Point::new(0, 0), margin),
            Point::new(0, 0)
        );
        assert_eq!(
            grid.clamped_sample(Point::new(9, 9), Point::new(4, 4), margin),
            Point::new(9, 9)
        );
        assert_eq!(
            grid.clamped_sample(Point::new(5, 5), Point::new(1, 3), margin),
            Point::new(4, 6)
        );
    }

    #[test]
    fn fits_checks_far_edges() {
        let grid = Grid::new(100, 100);
        assert!(grid.fits(Point::new(80, 80), Grid::new(20, 20)));
        assert!(!grid.fits(Point::new(90, 90), Grid::new(20, 20)));
    }
}
