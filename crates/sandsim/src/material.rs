//! Material ids, display colors and per-material movement rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Relative `(dx, dy)` offset tried by a moving cell. `+dy` points down.
pub type Offset = (i32, i32);

/// Dense material tag stored in every grid cell. Id `0` is background.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u8);

impl MaterialId {
    /// Empty space. Never a registered material.
    pub const BACKGROUND: Self = Self(0);

    #[must_use]
    pub const fn is_background(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u8> for MaterialId {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

/// 4-byte RGBA color: `#[repr(C)]` so a `[Rgba]` buffer uploads as RGBA8.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Construction parameters for one material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialParams {
    pub name: String,
    pub weight: i32,
    pub horizontal_spread: u32,
    pub vertical_bias: i32,
    pub color: Rgba,
}

impl MaterialParams {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        weight: i32,
        horizontal_spread: u32,
        vertical_bias: i32,
        color: Rgba,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            horizontal_spread,
            vertical_bias,
            color,
        }
    }
}

/// Immutable, fully resolved material. Behavior is entirely data-driven by
/// `movement_candidates`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialDefinition {
    id: MaterialId,
    name: String,
    weight: i32,
    horizontal_spread: u32,
    vertical_bias: i32,
    color: Rgba,
    movement_candidates: Vec<Offset>,
}

impl MaterialDefinition {
    #[must_use]
    pub fn new(id: MaterialId, params: &MaterialParams) -> Self {
        Self {
            id,
            name: params.name.clone(),
            weight: params.weight,
            horizontal_spread: params.horizontal_spread,
            vertical_bias: params.vertical_bias,
            color: params.color,
            movement_candidates: movement_candidates(params.horizontal_spread, params.vertical_bias),
        }
    }

    #[must_use]
    pub fn id(&self) -> MaterialId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn weight(&self) -> i32 {
        self.weight
    }

    #[must_use]
    pub fn horizontal_spread(&self) -> u32 {
        self.horizontal_spread
    }

    #[must_use]
    pub fn vertical_bias(&self) -> i32 {
        self.vertical_bias
    }

    #[must_use]
    pub fn color(&self) -> Rgba {
        self.color
    }

    #[must_use]
    pub fn movement_candidates(&self) -> &[Offset] {
        &self.movement_candidates
    }

    /// Static materials have no candidates and never move.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.movement_candidates.is_empty()
    }

    /// Whether this material sinks through `other` by swapping places.
    #[must_use]
    pub fn displaces(&self, other: &MaterialDefinition) -> bool {
        other.weight < self.weight
    }
}

/// Largest horizontal spread a material may declare.
pub const MAX_HORIZONTAL_SPREAD: u32 = u16::MAX as u32;

/// Build the priority-ordered candidate list: straight down, the two diagonals
/// at `vertical_bias`, then horizontal offsets alternating right/left with
/// increasing distance. Empty when both parameters are zero.
///
/// Spreads above [`MAX_HORIZONTAL_SPREAD`] are clamped to it; registries
/// reject such materials before they get here.
#[must_use]
pub fn movement_candidates(horizontal_spread: u32, vertical_bias: i32) -> Vec<Offset> {
    if horizontal_spread == 0 && vertical_bias == 0 {
        return Vec::new();
    }

    let spread = horizontal_spread.min(MAX_HORIZONTAL_SPREAD);
    let reach = i32::try_from(spread).unwrap_or(i32::MAX);
    let mut candidates = Vec::with_capacity(3 + 2 * spread as usize);
    candidates.push((0, 1));
    candidates.push((1, vertical_bias));
    candidates.push((-1, vertical_bias));
    for distance in 1..=reach {
        candidates.push((distance, 0));
        candidates.push((-distance, 0));
    }
    candidates
}

/// Built-in materials. Registration order defines their ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Preset {
    Water,
    Sand,
    Rock,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Water, Preset::Sand, Preset::Rock];

    #[must_use]
    pub fn params(self) -> MaterialParams {
        match self {
            Self::Water => MaterialParams::new("water", 2, 5, 1, Rgba::rgb(0, 121, 241)),
            Self::Sand => MaterialParams::new("sand", 5, 0, 5, Rgba::rgb(253, 249, 0)),
            Self::Rock => MaterialParams::new("rock", 10, 0, 0, Rgba::rgb(130, 130, 130)),
        }
    }

    /// Id assigned when the presets are registered in `ALL` order.
    #[must_use]
    pub fn id(self) -> MaterialId {
        match self {
            Self::Water => MaterialId(1),
            Self::Sand => MaterialId(2),
            Self::Rock => MaterialId(3),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Water => write!(f, "Water"),
            Self::Sand => write!(f, "Sand"),
            Self::Rock => write!(f, "Rock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rgba_is_4_bytes() {
        assert_eq!(std::mem::size_of::<Rgba>(), 4);
        assert_eq!(std::mem::size_of::<MaterialId>(), 1);
    }

    #[test]
    fn background_id_is_zero() {
        assert_eq!(MaterialId::BACKGROUND, MaterialId(0));
        assert!(MaterialId::BACKGROUND.is_background());
        assert!(!MaterialId(1).is_background());
        assert_eq!(MaterialId::default(), MaterialId::BACKGROUND);
    }

    #[test]
    fn static_material_has_no_candidates() {
        assert!(movement_candidates(0, 0).is_empty());
        let rock = MaterialDefinition::new(MaterialId(3), &Preset::Rock.params());
        assert!(rock.is_static());
    }

    #[test]
    fn water_candidates_in_priority_order() {
        let water = MaterialDefinition::new(MaterialId(1), &Preset::Water.params());
        assert_eq!(
            water.movement_candidates(),
            &[
                (0, 1),
                (1, 1),
                (-1, 1),
                (1, 0),
                (-1, 0),
                (2, 0),
                (-2, 0),
                (3, 0),
                (-3, 0),
                (4, 0),
                (-4, 0),
                (5, 0),
                (-5, 0),
            ]
        );
    }

    #[test]
    fn sand_prefers_deep_diagonals() {
        let sand = MaterialDefinition::new(MaterialId(2), &Preset::Sand.params());
        assert_eq!(sand.movement_candidates(), &[(0, 1), (1, 5), (-1, 5)]);
    }

    #[test]
    fn spread_without_bias_still_moves() {
        assert_eq!(
            movement_candidates(1, 0),
            vec![(0, 1), (1, 0), (-1, 0), (1, 0), (-1, 0)]
        );
    }

    #[test]
    fn displacement_is_strict() {
        let water = MaterialDefinition::new(MaterialId(1), &Preset::Water.params());
        let sand = MaterialDefinition::new(MaterialId(2), &Preset::Sand.params());
        assert!(sand.displaces(&water));
        assert!(!water.displaces(&sand));
        assert!(!sand.displaces(&sand.clone()));
    }

    #[test]
    fn preset_display() {
        assert_eq!(format!("{}", Preset::Water), "Water");
        assert_eq!(format!("{}", Preset::Rock), "Rock");
        assert_eq!(format!("{}", MaterialId(7)), "#7");
    }

    #[test]
    fn oversized_spread_is_clamped() {
        let candidates = movement_candidates(i32::MAX as u32 + 1, 1);
        assert_eq!(candidates.len(), 3 + 2 * MAX_HORIZONTAL_SPREAD as usize);
        let last = MAX_HORIZONTAL_SPREAD as i32;
        assert_eq!(candidates[candidates.len() - 2..], [(last, 0), (-last, 0)]);

        assert_eq!(movement_candidates(u32::MAX, 0).len(), 3 + 2 * MAX_HORIZONTAL_SPREAD as usize);
    }

    proptest! {
        #[test]
        fn prop_candidate_list_shape(spread in 0u32..32, bias in -8i32..8) {
            let candidates = movement_candidates(spread, bias);
            if spread == 0 && bias == 0 {
                prop_assert!(candidates.is_empty());
            } else {
                prop_assert_eq!(candidates.len(), 3 + 2 * spread as usize);
                prop_assert_eq!(candidates[0], (0, 1));
                prop_assert_eq!(candidates[1], (1, bias));
                prop_assert_eq!(candidates[2], (-1, bias));
                for distance in 1..=spread as i32 {
                    let at = 3 + 2 * (distance as usize - 1);
                    prop_assert_eq!(candidates[at], (distance, 0));
                    prop_assert_eq!(candidates[at + 1], (-distance, 0));
                }
            }
        }
    }
}
