//! Error types for grid access, material registration and configuration.

use thiserror::Error;

use crate::material::MaterialId;

/// Errors raised by direct grid access.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("expected {expected} cells for the grid, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Errors raised while building a material registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("at most {max} materials can be registered, got {count}")]
    TooManyMaterials { count: usize, max: usize },
    #[error("material {name:?} spreads {spread} cells, at most {max} allowed")]
    SpreadTooLarge { name: String, spread: u32, max: u32 },
}

/// Errors raised when validating session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    ZeroSizedGrid { width: usize, height: usize },
    #[error("at least one material must be configured")]
    NoMaterials,
    #[error("material {name:?} spreads {spread} cells on a grid {width} cells wide")]
    SpreadWiderThanGrid { name: String, spread: u32, width: usize },
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced by a simulation session.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("material {0} is not registered")]
    UnknownMaterial(MaterialId),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
