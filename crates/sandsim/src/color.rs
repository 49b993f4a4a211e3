//! Projects the id grid to display colors for the render layer.

use crate::material::Rgba;
use crate::registry::MaterialRegistry;
use crate::Grid;

/// Bytes per pixel in an RGBA8 texture.
pub const RGBA8_STRIDE: usize = 4;

/// Call `f(x, y, color)` for every cell in row-major order.
pub fn for_each_cell<F>(grid: &Grid, registry: &MaterialRegistry, mut f: F)
where
    F: FnMut(usize, usize, Rgba),
{
    let width = grid.width();
    if width == 0 {
        return;
    }
    for (i, &id) in grid.cells().iter().enumerate() {
        f(i % width, i / width, registry.color_of(id));
    }
}

/// One color per cell, row-major, `width * height` long.
#[must_use]
pub fn color_buffer(grid: &Grid, registry: &MaterialRegistry) -> Vec<Rgba> {
    grid.cells().iter().map(|&id| registry.color_of(id)).collect()
}

/// Write RGBA8 pixels into `out`, which should hold `width * height * 4`
/// bytes. Extra bytes are left untouched.
pub fn write_rgba8(grid: &Grid, registry: &MaterialRegistry, out: &mut [u8]) {
    debug_assert!(out.len() >= grid.len() * RGBA8_STRIDE);
    for (pixel, &id) in out.chunks_exact_mut(RGBA8_STRIDE).zip(grid.cells()) {
        pixel.copy_from_slice(&registry.color_of(id).to_array());
    }
}
