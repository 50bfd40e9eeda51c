use crate::grid::Grid;

pub enum Message {
    /// Kernel of the given size has been built.
    BuildingKernel(usize),
    /// Row `.0` of `.1` is being convolved.
    Convolving(usize, usize),
    Extracting(Grid),
    Integrating(Grid),
    Scaling(usize),
}

pub trait Verboser {
    fn verbose(&mut self, message: Message);
}

pub struct Silent;

impl Verboser for Silent {
    fn verbose(&mut self, _: Message) {}
}

/// Forwards progress to `tracing`; rows are only reported every `row_interval` rows.
pub struct Traced {
    pub row_interval: usize,
}

impl Default for Traced {
    fn default() -> Self {
        Self { row_interval: 64 }
    }
}

impl Verboser for Traced {
    fn verbose(&mut self, message: Message) {
        match message {
            Message::BuildingKernel(size) => tracing::debug!(size, "building kernel"),
            Message::Convolving(row, height) => {
                if row == height || row % self.row_interval.max(1) == 0 {
                    tracing::trace!(row, height, "convolving");
                }
            }
            Message::Extracting(grid) => {
                tracing::debug!(width = grid.width, height = grid.height, "extracting region")
            }
            Message::Integrating(grid) => {
                tracing::debug!(width = grid.width, height = grid.height, "integrating region")
            }
            Message::Scaling(factor) => tracing::debug!(factor, "scaling"),
        }
    }
}
