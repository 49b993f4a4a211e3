//! Immutable lookup from material id to definition.

use tracing::debug;

use crate::error::RegistryError;
use crate::material::{
    MaterialDefinition, MaterialId, MaterialParams, Preset, Rgba, MAX_HORIZONTAL_SPREAD,
};

/// Ids are `u8` and `0` is background.
pub const MAX_MATERIALS: usize = u8::MAX as usize;

/// Dense, array-indexed material table. Ids are assigned sequentially from 1
/// in registration order.
#[derive(Clone, Debug)]
pub struct MaterialRegistry {
    materials: Vec<MaterialDefinition>,
    background: Rgba,
}

impl MaterialRegistry {
    /// Register `params` in order, assigning ids `1..=n`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TooManyMaterials`] when more than
    /// [`MAX_MATERIALS`] entries are supplied, and
    /// [`RegistryError::SpreadTooLarge`] for a spread above
    /// [`MAX_HORIZONTAL_SPREAD`].
    pub fn new<I>(params: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = MaterialParams>,
    {
        let params: Vec<MaterialParams> = params.into_iter().collect();
        if params.len() > MAX_MATERIALS {
            return Err(RegistryError::TooManyMaterials {
                count: params.len(),
                max: MAX_MATERIALS,
            });
        }
        if let Some(p) = params
            .iter()
            .find(|p| p.horizontal_spread > MAX_HORIZONTAL_SPREAD)
        {
            return Err(RegistryError::SpreadTooLarge {
                name: p.name.clone(),
                spread: p.horizontal_spread,
                max: MAX_HORIZONTAL_SPREAD,
            });
        }

        let materials = params
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let def = MaterialDefinition::new(MaterialId(index as u8 + 1), p);
                debug!(
                    id = def.id().0,
                    name = def.name(),
                    weight = def.weight(),
                    candidates = def.movement_candidates().len(),
                    "registered material"
                );
                def
            })
            .collect();

        Ok(Self {
            materials,
            background: Rgba::WHITE,
        })
    }

    /// Water, sand and rock, registered in [`Preset::ALL`] order.
    #[must_use]
    pub fn presets() -> Self {
        let materials = Preset::ALL
            .iter()
            .map(|preset| MaterialDefinition::new(preset.id(), &preset.params()))
            .collect();
        Self {
            materials,
            background: Rgba::WHITE,
        }
    }

    #[must_use]
    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// `None` for background and for any id that was never registered.
    #[inline]
    #[must_use]
    pub fn by_id(&self, id: MaterialId) -> Option<&MaterialDefinition> {
        id.index()
            .checked_sub(1)
            .and_then(|index| self.materials.get(index))
    }

    #[must_use]
    pub fn contains(&self, id: MaterialId) -> bool {
        self.by_id(id).is_some()
    }

    /// Display color; unknown ids fall back to the background color.
    #[inline]
    #[must_use]
    pub fn color_of(&self, id: MaterialId) -> Rgba {
        self.by_id(id).map_or(self.background, MaterialDefinition::color)
    }

    #[must_use]
    pub fn background(&self) -> Rgba {
        self.background
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<MaterialId> {
        self.materials
            .iter()
            .find(|def| def.name() == name)
            .map(MaterialDefinition::id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialDefinition> {
        self.materials.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = MaterialId> + '_ {
        self.materials.iter().map(MaterialDefinition::id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::presets()
    }
}
