//! Relative-offset API used by the stepper to inspect and move one cell.

use crate::material::MaterialId;
use crate::Grid;

/// An in-bounds neighbor: its flat index and current occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub index: usize,
    pub x: i32,
    pub y: i32,
    pub id: MaterialId,
}

/// View of the grid centered on `(x, y)`. Out-of-bounds lookups return
/// `None`; writes only go through indices a lookup already validated.
#[derive(Debug)]
pub struct CellApi<'a> {
    pub grid: &'a mut Grid,
    pub x: i32,
    pub y: i32,
    origin: usize,
}

impl<'a> CellApi<'a> {
    /// `None` when `(x, y)` is outside the grid.
    pub fn new(grid: &'a mut Grid, x: i32, y: i32) -> Option<Self> {
        let origin = grid.index_of(x, y)?;
        Some(Self { grid, x, y, origin })
    }

    /// Flat index of the centered cell.
    #[must_use]
    pub fn origin(&self) -> usize {
        self.origin
    }

    #[must_use]
    pub fn me(&self) -> MaterialId {
        self.grid.cell_at(self.origin)
    }

    #[must_use]
    pub fn get(&self, dx: i32, dy: i32) -> Option<Neighbor> {
        let (x, y) = (self.x.checked_add(dx)?, self.y.checked_add(dy)?);
        let index = self.grid.index_of(x, y)?;
        Some(Neighbor {
            index,
            x,
            y,
            id: self.grid.cell_at(index),
        })
    }

    /// Move into an empty neighbor, leaving background behind.
    pub fn move_to(&mut self, target: Neighbor) {
        let me = self.me();
        self.grid.set_at(self.origin, MaterialId::BACKGROUND);
        self.grid.set_at(target.index, me);
    }

    /// Trade places with an occupied neighbor.
    pub fn swap_with(&mut self, target: Neighbor) {
        let me = self.me();
        self.grid.set_at(self.origin, target.id);
        self.grid.set_at(target.index, me);
    }
}
