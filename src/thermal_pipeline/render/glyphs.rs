use std::str::FromStr;

use crate::thermal_pipeline::common::error::{Result, ThermalError};

/// Density ramp from emptiest to fullest.
pub const DEFAULT_GLYPH_RAMP: &str = " ░▒▓█";

/// Ordered glyphs used to encode intensity independently of color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    pub fn new(glyphs: &str) -> Result<Self> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(ThermalError::InvalidGlyphRamp("ramp must contain at least one glyph".to_string()));
        }
        Ok(Self { glyphs })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// `floor(v / 255 * (N - 1))`, clamped to the ramp.
    pub fn index_for(&self, intensity: u8) -> usize {
        let last = self.glyphs.len() - 1;
        let index = ((intensity as f32 / 255.0) * last as f32).floor() as usize;
        index.min(last)
    }

    pub fn glyph_for(&self, intensity: u8) -> char {
        self.glyphs[self.index_for(intensity)]
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self { glyphs: DEFAULT_GLYPH_RAMP.chars().collect() }
    }
}

impl FromStr for GlyphRamp {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
