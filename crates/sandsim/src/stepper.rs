//! Per-frame grid update.
//!
//! Each step flips the sweep direction, then walks columns in that order and
//! every column bottom row first. An occupied cell tries its material's
//! movement candidates in order: it moves into the first in-bounds empty
//! target, or swaps with the first in-bounds target of strictly lower
//! weight. Cells that arrived somewhere this step are stamped and not
//! visited again, so every particle starts at most one move per step.

use std::ops::AddAssign;

use crate::api::CellApi;
use crate::material::MaterialDefinition;
use crate::registry::MaterialRegistry;
use crate::Grid;

/// Horizontal column order for one step.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Sweep {
    LeftToRight,
    #[default]
    RightToLeft,
}

impl Sweep {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::LeftToRight => Self::RightToLeft,
            Self::RightToLeft => Self::LeftToRight,
        }
    }

    /// Column indices in sweep order.
    #[must_use]
    pub fn columns(self, width: i32) -> Box<dyn Iterator<Item = i32>> {
        match self {
            Self::LeftToRight => Box::new(0..width),
            Self::RightToLeft => Box::new((0..width).rev()),
        }
    }
}

/// Movement counts for one or more steps.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct StepReport {
    /// Moves into an empty cell.
    pub moved: u64,
    /// Swaps with a lighter material.
    pub displaced: u64,
}

impl StepReport {
    #[must_use]
    pub fn total(self) -> u64 {
        self.moved + self.displaced
    }

    #[must_use]
    pub fn is_settled(self) -> bool {
        self.total() == 0
    }
}

impl AddAssign for StepReport {
    fn add_assign(&mut self, rhs: Self) {
        self.moved += rhs.moved;
        self.displaced += rhs.displaced;
    }
}

/// Hooks into a step for diagnostics and tests. Both default to no-ops.
pub trait StepObserver {
    /// An occupied cell at `(x, y)` is about to try its candidates.
    fn visit(&mut self, _x: i32, _y: i32) {}

    /// A cell moved from `from` to `to`; `displaced` when it swapped.
    fn moved(&mut self, _from: (i32, i32), _to: (i32, i32), _displaced: bool) {}
}

impl StepObserver for () {}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Outcome {
    Stayed,
    Moved,
    Displaced,
}

/// Owns the alternating sweep flag and the per-cell arrival stamps.
#[derive(Clone, Debug, Default)]
pub struct Stepper {
    sweep: Sweep,
    generation: u32,
    stamps: Vec<u32>,
}

impl Stepper {
    /// The first step sweeps left to right.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The first step sweeps in `first`.
    #[must_use]
    pub fn starting_with(first: Sweep) -> Self {
        Self {
            sweep: first.flipped(),
            ..Self::default()
        }
    }

    /// Direction of the most recent step.
    #[must_use]
    pub fn sweep(&self) -> Sweep {
        self.sweep
    }

    /// Direction the next step will use.
    #[must_use]
    pub fn next_sweep(&self) -> Sweep {
        self.sweep.flipped()
    }

    /// Advance `grid` by one frame.
    pub fn step(&mut self, grid: &mut Grid, registry: &MaterialRegistry) -> StepReport {
        self.step_observed(grid, registry, &mut ())
    }

    /// [`Stepper::step`] with an observer notified of visits and moves.
    pub fn step_observed<O>(
        &mut self,
        grid: &mut Grid,
        registry: &MaterialRegistry,
        observer: &mut O,
    ) -> StepReport
    where
        O: StepObserver + ?Sized,
    {
        self.sweep = self.sweep.flipped();
        let gen = self.next_generation(grid.len());
        let w = grid.width() as i32;
        let h = grid.height() as i32;
        let mut report = StepReport::default();

        for x in self.sweep.columns(w) {
            for y in (0..h).rev() {
                let Some(mut api) = CellApi::new(grid, x, y) else {
                    continue;
                };
                let id = api.me();
                if id.is_background() {
                    continue;
                }
                if self.stamps[api.origin()] == gen {
                    continue;
                }
                let Some(material) = registry.by_id(id) else {
                    continue;
                };
                observer.visit(x, y);
                match update_cell(&mut api, material, registry, &mut self.stamps, gen, observer) {
                    Outcome::Moved => report.moved += 1,
                    Outcome::Displaced => report.displaced += 1,
                    Outcome::Stayed => {}
                }
            }
        }
        report
    }

    fn next_generation(&mut self, cells: usize) -> u32 {
        if self.stamps.len() != cells {
            self.stamps = vec![0; cells];
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.stamps.fill(0);
            self.generation = 1;
        }
        self.generation
    }
}

fn update_cell<O>(
    api: &mut CellApi<'_>,
    material: &MaterialDefinition,
    registry: &MaterialRegistry,
    stamps: &mut [u32],
    gen: u32,
    observer: &mut O,
) -> Outcome
where
    O: StepObserver + ?Sized,
{
    for &(dx, dy) in material.movement_candidates() {
        let Some(target) = api.get(dx, dy) else {
            continue;
        };

        let outcome = if target.id.is_background() {
            api.move_to(target);
            Outcome::Moved
        } else if registry
            .by_id(target.id)
            .is_some_and(|other| material.displaces(other))
        {
            api.swap_with(target);
            Outcome::Displaced
        } else {
            continue;
        };

        stamps[target.index] = gen;
        observer.moved((api.x, api.y), (target.x, target.y), outcome == Outcome::Displaced);
        return outcome;
    }
    Outcome::Stayed
}
