//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RegistryError};
use crate::material::{MaterialParams, Preset, Rgba};
use crate::registry::{MaterialRegistry, MAX_MATERIALS};

/// Static configuration for one simulation session. Missing fields take the
/// defaults below when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Half-width of the square paint brush.
    pub brush_radius: u32,
    /// Let the brush paint when its center cell is already occupied.
    pub allow_overwrite: bool,
    /// Frame rate the shell should target.
    pub target_fps: u32,
    /// Frames run by the benchmark key.
    pub benchmark_frames: u32,
    /// Fraction of upper-half cells filled by the noise spawner.
    pub spawn_fill: f64,
    /// Optional seed for reproducible spawning.
    pub rng_seed: Option<u64>,
    /// Color of empty cells.
    pub background: Rgba,
    /// Materials in id order, starting at id 1.
    pub materials: Vec<MaterialParams>,
}

/// Seed used for spawning when the configuration names none.
pub const DEFAULT_RNG_SEED: u64 = 0x5eed;

/// Per-session input and pacing knobs carried from [`SimulationConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub brush_radius: u32,
    pub allow_overwrite: bool,
    pub target_fps: u32,
    pub benchmark_frames: u32,
    pub spawn_fill: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            brush_radius: 3,
            allow_overwrite: false,
            target_fps: 200,
            benchmark_frames: 1000,
            spawn_fill: 0.5,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let settings = SessionSettings::default();
        Self {
            width: 800,
            height: 480,
            brush_radius: settings.brush_radius,
            allow_overwrite: settings.allow_overwrite,
            target_fps: settings.target_fps,
            benchmark_frames: settings.benchmark_frames,
            spawn_fill: settings.spawn_fill,
            rng_seed: None,
            background: Rgba::WHITE,
            materials: Preset::ALL.iter().map(|p| p.params()).collect(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error
    /// [`SimulationConfig::validate`] reports.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Rejects zero-sized grids, an empty material list, more materials
    /// than ids can address and horizontal spreads wider than the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroSizedGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.materials.is_empty() {
            return Err(ConfigError::NoMaterials);
        }
        if self.materials.len() > MAX_MATERIALS {
            return Err(RegistryError::TooManyMaterials {
                count: self.materials.len(),
                max: MAX_MATERIALS,
            }
            .into());
        }
        if let Some(p) = self
            .materials
            .iter()
            .find(|p| p.horizontal_spread as usize > self.width)
        {
            return Err(ConfigError::SpreadWiderThanGrid {
                name: p.name.clone(),
                spread: p.horizontal_spread,
                width: self.width,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn settings(&self) -> SessionSettings {
        SessionSettings {
            brush_radius: self.brush_radius,
            allow_overwrite: self.allow_overwrite,
            target_fps: self.target_fps,
            benchmark_frames: self.benchmark_frames,
            spawn_fill: self.spawn_fill,
        }
    }

    /// The configured seed, or [`DEFAULT_RNG_SEED`].
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng_seed.unwrap_or(DEFAULT_RNG_SEED)
    }

    /// # Errors
    ///
    /// Fails when the configuration does not validate.
    pub fn build_registry(&self) -> Result<MaterialRegistry, ConfigError> {
        self.validate()?;
        let registry = MaterialRegistry::new(self.materials.iter().cloned())?;
        Ok(registry.with_background(self.background))
    }
}
