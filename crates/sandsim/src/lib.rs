//! Falling sand simulation engine.
//!
//! Cells hold a [`MaterialId`]; every material's movement is described by a
//! precomputed candidate list (see [`material::movement_candidates`]) and a
//! weight that decides who sinks through whom. [`Stepper`] advances a
//! [`Grid`] one frame at a time and [`Simulation`] ties grid, registry and
//! stepper into a single session.

pub mod api;
pub mod color;
pub mod config;
pub mod error;
pub mod material;
pub mod registry;
pub mod simulation;
pub mod spawn;
pub mod stepper;
pub mod universe;


pub use config::{SessionSettings, SimulationConfig};
pub use error::{ConfigError, GridError, RegistryError, SimulationError};
pub use material::{MaterialDefinition, MaterialId, MaterialParams, Preset, Rgba};
pub use registry::MaterialRegistry;
pub use simulation::Simulation;
pub use stepper::{StepObserver, StepReport, Stepper, Sweep};
pub use universe::Universe;

/// 2D row-major grid of material ids. Out-of-bounds `get`/`set` fail with
/// [`GridError::OutOfBounds`]; `paint` clips instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<MaterialId>,
}

impl Grid {
    /// Background-filled grid. Zero-sized grids are allowed but hold no cells.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![MaterialId::BACKGROUND; width * height],
        }
    }

    /// Wrap existing row-major cell data.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::SizeMismatch`] when `cells.len() != width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<MaterialId>) -> Result<Self, GridError> {
        if cells.len() != width * height {
            return Err(GridError::SizeMismatch {
                expected: width * height,
                actual: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn cells(&self) -> &[MaterialId] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    #[inline]
    #[must_use]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] outside `[0, width) x [0, height)`.
    pub fn get(&self, x: i32, y: i32) -> Result<MaterialId, GridError> {
        self.index_of(x, y)
            .map(|i| self.cells[i])
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Does not check `id` against any registry.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] outside `[0, width) x [0, height)`.
    pub fn set(&mut self, x: i32, y: i32, id: MaterialId) -> Result<(), GridError> {
        let i = self.index_of(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.cells[i] = id;
        Ok(())
    }

    /// Fill the `(2r+1)`-wide square around `(center_x, center_y)` with `id`,
    /// clipped to the grid. Returns the number of cells written.
    ///
    /// Without `allow_overwrite` the whole brush is skipped unless the
    /// center cell is background; cells under the rest of the brush are
    /// overwritten either way. A center off the grid counts as occupied.
    pub fn paint(
        &mut self,
        center_x: i32,
        center_y: i32,
        id: MaterialId,
        brush_radius: u32,
        allow_overwrite: bool,
    ) -> usize {
        if !allow_overwrite && self.get(center_x, center_y) != Ok(MaterialId::BACKGROUND) {
            return 0;
        }
        if self.is_empty() {
            return 0;
        }

        let r = i64::from(brush_radius);
        let x0 = (i64::from(center_x) - r).max(0);
        let x1 = (i64::from(center_x) + r).min(self.width as i64 - 1);
        let y0 = (i64::from(center_y) - r).max(0);
        let y1 = (i64::from(center_y) + r).min(self.height as i64 - 1);
        if x0 > x1 || y0 > y1 {
            return 0;
        }

        for y in y0..=y1 {
            let row = y as usize * self.width;
            self.cells[row + x0 as usize..=row + x1 as usize].fill(id);
        }
        ((x1 - x0 + 1) * (y1 - y0 + 1)) as usize
    }

    pub fn clear(&mut self) {
        self.cells.fill(MaterialId::BACKGROUND);
    }

    #[must_use]
    pub fn count(&self, id: MaterialId) -> usize {
        self.cells.iter().filter(|&&cell| cell == id).count()
    }

    pub(crate) fn cell_at(&self, index: usize) -> MaterialId {
        self.cells[index]
    }

    pub(crate) fn set_at(&mut self, index: usize, id: MaterialId) {
        self.cells[index] = id;
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> GridError {
        GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}
