//! One simulation session: a grid, its material registry and a stepper.
//!
//! All mutators take `&mut self`, so input painting, spawning and stepping
//! are serialized by the borrow checker. The shell calls `paint` for each
//! input event, then `step` once per frame, then reads colors for display.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, trace, warn};

use crate::color;
use crate::config::{SessionSettings, SimulationConfig, DEFAULT_RNG_SEED};
use crate::error::SimulationError;
use crate::material::{MaterialId, Rgba};
use crate::registry::MaterialRegistry;
use crate::spawn;
use crate::stepper::{StepObserver, StepReport, Stepper, Sweep};
use crate::Grid;

#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    registry: Arc<MaterialRegistry>,
    stepper: Stepper,
    frame: u64,
    settings: SessionSettings,
    rng: SmallRng,
}

impl Simulation {
    #[must_use]
    pub fn new(grid: Grid, registry: Arc<MaterialRegistry>) -> Self {
        info!(
            width = grid.width(),
            height = grid.height(),
            materials = registry.len(),
            "simulation session created"
        );
        Self {
            grid,
            registry,
            stepper: Stepper::new(),
            frame: 0,
            settings: SessionSettings::default(),
            rng: SmallRng::seed_from_u64(DEFAULT_RNG_SEED),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Reseed the session generator used by [`Simulation::spawn_noise`].
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Background-filled grid sized and populated from `config`, carrying
    /// its brush, pacing and spawn settings and seeded from its `rng_seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] when `config` does not validate.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let registry = config.build_registry()?;
        Ok(Self::new(
            Grid::new(config.width, config.height),
            Arc::new(registry),
        )
        .with_settings(config.settings())
        .with_rng_seed(config.seed()))
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<MaterialRegistry> {
        &self.registry
    }

    /// Steps taken since the session started.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Direction the next step will sweep.
    #[must_use]
    pub fn next_sweep(&self) -> Sweep {
        self.stepper.next_sweep()
    }

    /// Paint a square brush, see [`Grid::paint`]. Background erases.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownMaterial`] for ids the registry does
    /// not know; the grid is left untouched.
    pub fn paint(
        &mut self,
        x: i32,
        y: i32,
        id: MaterialId,
        brush_radius: u32,
        allow_overwrite: bool,
    ) -> Result<usize, SimulationError> {
        if !id.is_background() && !self.registry.contains(id) {
            warn!(id = id.0, x, y, "rejected paint with unregistered material");
            return Err(SimulationError::UnknownMaterial(id));
        }
        Ok(self.grid.paint(x, y, id, brush_radius, allow_overwrite))
    }

    /// [`Simulation::paint`] with the session's brush radius and overwrite
    /// setting.
    ///
    /// # Errors
    ///
    /// Same as [`Simulation::paint`].
    pub fn paint_brush(&mut self, x: i32, y: i32, id: MaterialId) -> Result<usize, SimulationError> {
        let SessionSettings {
            brush_radius,
            allow_overwrite,
            ..
        } = self.settings;
        self.paint(x, y, id, brush_radius, allow_overwrite)
    }

    pub fn step(&mut self) -> StepReport {
        self.step_observed(&mut ())
    }

    pub fn step_observed<O>(&mut self, observer: &mut O) -> StepReport
    where
        O: StepObserver + ?Sized,
    {
        let report = self
            .stepper
            .step_observed(&mut self.grid, &self.registry, observer);
        self.frame += 1;
        trace!(
            frame = self.frame,
            moved = report.moved,
            displaced = report.displaced,
            "step"
        );
        report
    }

    /// Run `frames` steps back to back and sum their reports.
    pub fn run_frames(&mut self, frames: u32) -> StepReport {
        let mut total = StepReport::default();
        for _ in 0..frames {
            total += self.step();
        }
        total
    }

    /// Run the configured number of benchmark frames.
    pub fn run_benchmark(&mut self) -> StepReport {
        let frames = self.settings.benchmark_frames;
        info!(frames, "benchmark started");
        self.run_frames(frames)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        info!(frame = self.frame, "grid cleared");
    }

    /// See [`spawn::spawn_upper_half`].
    pub fn spawn_upper_half<R>(&mut self, rng: &mut R, fill: f64) -> usize
    where
        R: Rng + ?Sized,
    {
        spawn::spawn_upper_half(&mut self.grid, &self.registry, rng, fill)
    }

    /// Spawn with the session generator and the configured fill fraction.
    /// Successive calls continue the same random stream.
    pub fn spawn_noise(&mut self) -> usize {
        let fill = self.settings.spawn_fill;
        spawn::spawn_upper_half(&mut self.grid, &self.registry, &mut self.rng, fill)
    }

    pub fn for_each_cell<F>(&self, f: F)
    where
        F: FnMut(usize, usize, Rgba),
    {
        color::for_each_cell(&self.grid, &self.registry, f);
    }

    #[must_use]
    pub fn color_buffer(&self) -> Vec<Rgba> {
        color::color_buffer(&self.grid, &self.registry)
    }

    pub fn write_rgba8(&self, out: &mut [u8]) {
        color::write_rgba8(&self.grid, &self.registry, out);
    }
}
