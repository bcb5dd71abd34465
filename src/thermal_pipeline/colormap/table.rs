use tracing::debug;

use crate::thermal_pipeline::colormap::provider::{get_colormap, ColormapName, Rgb};
use crate::thermal_pipeline::common::error::{Result, ThermalError};

/// One table entry per possible 8-bit intensity.
pub const DEFAULT_LEVELS: usize = 256;

/// Precomputed colormap lookup, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    colormap: ColormapName,
    entries: Vec<Rgb>,
}

impl ColorTable {
    /// Samples `colormap` at `i / levels` for every `i` in `[0, levels)`.
    pub fn build(colormap: ColormapName, levels: usize) -> Result<Self> {
        if levels == 0 {
            return Err(ThermalError::InvalidColorLevels(levels));
        }
        let map = get_colormap(colormap);
        let entries = (0..levels)
            .map(|i| map(i as f32 / levels as f32))
            .collect();

        debug!(colormap = %colormap, levels, "Built color table");
        Ok(Self { colormap, entries })
    }

    pub fn colormap(&self) -> ColormapName {
        self.colormap
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Rgb] {
        &self.entries
    }

    /// Color for an intensity. With the default 256 levels the intensity is
    /// the index; smaller tables are addressed proportionally.
    pub fn lookup(&self, intensity: u8) -> Rgb {
        let index = intensity as usize * self.entries.len() / DEFAULT_LEVELS;
        self.entries[index.min(self.entries.len() - 1)]
    }
}
