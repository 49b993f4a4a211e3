//! Browser-facing wrapper around a [`Simulation`].
//!
//! JS owns the render loop: it calls `paint`/`set_cell` from input, `tick`
//! once per frame, then uploads `pixels_ptr()` (RGBA8, `width * height * 4`
//! bytes) as a texture. Failures reach JS as thrown `Error`s.

use std::fmt::Display;

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::color::RGBA8_STRIDE;
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::material::MaterialId;
use crate::registry::MaterialRegistry;
use crate::simulation::Simulation;
use crate::Grid;

#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    sim: Simulation,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl Universe {
    /// Preset materials (water = 1, sand = 2, rock = 3). Zero dimensions are
    /// bumped to 1.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(width: usize, height: usize) -> Universe {
        let grid = Grid::new(width.max(1), height.max(1));
        Self::wrap(Simulation::new(grid, Arc::new(MaterialRegistry::presets())))
    }

    /// Build from a JSON [`SimulationConfig`] document. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Throws when the document does not parse or validate.
    pub fn from_config_json(json: &str) -> Result<Universe, JsError> {
        let config = SimulationConfig::from_json(json).map_err(js_error)?;
        Self::from_config(&config).map_err(js_error)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.sim.grid().width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.sim.grid().height()
    }

    #[must_use]
    pub fn material_count(&self) -> usize {
        self.sim.registry().len()
    }

    #[must_use]
    pub fn material_id(&self, name: &str) -> Option<u8> {
        self.sim.registry().find(name).map(|id| id.0)
    }

    /// Advance one frame and refresh the pixel buffer.
    pub fn tick(&mut self) {
        self.sim.step();
        self.sync_pixels();
    }

    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.sim.settings().target_fps
    }

    #[must_use]
    pub fn brush_radius(&self) -> u32 {
        self.sim.settings().brush_radius
    }

    /// Returns the number of cells written.
    ///
    /// # Errors
    ///
    /// Throws when `material` is not registered.
    pub fn paint(
        &mut self,
        x: i32,
        y: i32,
        material: u8,
        brush_radius: u32,
        allow_overwrite: bool,
    ) -> Result<usize, JsError> {
        self.try_paint(x, y, material, Some((brush_radius, allow_overwrite)))
            .map_err(js_error)
    }

    /// Paint with the configured brush radius and overwrite setting.
    ///
    /// # Errors
    ///
    /// Throws when `material` is not registered.
    pub fn paint_brush(&mut self, x: i32, y: i32, material: u8) -> Result<usize, JsError> {
        self.try_paint(x, y, material, None).map_err(js_error)
    }

    /// Single-cell overwrite.
    ///
    /// # Errors
    ///
    /// Throws when `material` is not registered.
    pub fn set_cell(&mut self, x: i32, y: i32, material: u8) -> Result<usize, JsError> {
        self.paint(x, y, material, 0, true)
    }

    #[must_use]
    pub fn get_cell(&self, x: i32, y: i32) -> Option<u8> {
        self.sim.grid().get(x, y).ok().map(|id| id.0)
    }

    pub fn clear(&mut self) {
        self.sim.clear();
        self.sync_pixels();
    }

    /// Random fill of the upper half, reproducible for a given `seed`.
    pub fn spawn_noise(&mut self, seed: u64, fill: f64) -> usize {
        let mut rng = SmallRng::seed_from_u64(seed);
        let filled = self.sim.spawn_upper_half(&mut rng, fill);
        self.sync_pixels();
        filled
    }

    /// Random fill of the upper half using the configured seed and fill
    /// fraction. Successive calls continue the same random stream.
    pub fn spawn_configured(&mut self) -> usize {
        let filled = self.sim.spawn_noise();
        self.sync_pixels();
        filled
    }

    /// Run `frames` steps without syncing in between. Returns the number of
    /// moves and displacements performed.
    pub fn benchmark(&mut self, frames: u32) -> u64 {
        let report = self.sim.run_frames(frames);
        self.sync_pixels();
        report.total()
    }

    /// [`Universe::benchmark`] for the configured number of frames.
    pub fn run_benchmark(&mut self) -> u64 {
        let report = self.sim.run_benchmark();
        self.sync_pixels();
        report.total()
    }

    #[must_use]
    pub fn pixels_ptr(&self) -> *const u8 {
        self.pixels.as_ptr()
    }

    #[must_use]
    pub fn pixels_len(&self) -> usize {
        self.pixels.len()
    }
}

impl Universe {
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] when `config` does not validate.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        Ok(Self::wrap(Simulation::from_config(config)?))
    }

    /// Paint and resync pixels. `brush` overrides the session's brush
    /// radius and overwrite setting.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownMaterial`] for unregistered ids.
    pub fn try_paint(
        &mut self,
        x: i32,
        y: i32,
        material: u8,
        brush: Option<(u32, bool)>,
    ) -> Result<usize, SimulationError> {
        let id = MaterialId(material);
        let painted = match brush {
            Some((radius, allow_overwrite)) => self.sim.paint(x, y, id, radius, allow_overwrite),
            None => self.sim.paint_brush(x, y, id),
        }?;
        self.sync_pixels();
        Ok(painted)
    }

    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn wrap(sim: Simulation) -> Self {
        let pixels = vec![0; sim.grid().len() * RGBA8_STRIDE];
        let mut universe = Universe { sim, pixels };
        universe.sync_pixels();
        universe
    }

    fn sync_pixels(&mut self) {
        self.sim.write_rgba8(&mut self.pixels);
    }
}

fn js_error(err: impl Display) -> JsError {
    JsError::new(&err.to_string())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn unknown_material_throws() {
        let mut universe = Universe::new(3, 3);
        assert!(universe.paint(1, 1, 77, 1, true).is_err());
        assert!(universe.set_cell(0, 0, 77).is_err());
        assert!(Universe::from_config_json(r#"{"materials": []}"#).is_err());
    }
}
