//! Random bulk fill used by the benchmark and noise buttons.
//!
//! Randomness lives only here. The generator is injected so callers decide
//! between a seeded [`rand::rngs::SmallRng`] and anything else.

use rand::Rng;

use crate::material::MaterialId;
use crate::registry::MaterialRegistry;
use crate::Grid;

/// Assign every cell in the upper half (`y < height / 2`) a uniformly random
/// registered material with probability `fill`, background otherwise.
/// `fill` is clamped to `[0, 1]`. Returns the number of cells filled.
pub fn spawn_upper_half<R>(grid: &mut Grid, registry: &MaterialRegistry, rng: &mut R, fill: f64) -> usize
where
    R: Rng + ?Sized,
{
    let fill = if fill.is_nan() { 0.0 } else { fill.clamp(0.0, 1.0) };
    let count = registry.len() as u8;
    let width = grid.width() as i32;
    let rows = (grid.height() / 2) as i32;
    let mut filled = 0;

    for y in 0..rows {
        for x in 0..width {
            let id = if count > 0 && rng.random_bool(fill) {
                filled += 1;
                MaterialId(rng.random_range(1..=count))
            } else {
                MaterialId::BACKGROUND
            };
            if let Some(i) = grid.index_of(x, y) {
                grid.set_at(i, id);
            }
        }
    }
    filled
}
