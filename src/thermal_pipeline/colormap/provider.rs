//! Named perceptual colormaps.
//!
//! The perceptual maps sample the full 256-entry matplotlib ramps shipped
//! by `colorous`; grayscale is a plain linear ramp.

use std::fmt;
use std::str::FromStr;

use crate::thermal_pipeline::common::error::ThermalError;

/// 24-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<colorous::Color> for Rgb {
    fn from(color: colorous::Color) -> Self {
        Self::new(color.r, color.g, color.b)
    }
}

/// Maps a normalised position in `[0, 1]` to a color.
pub type ColormapFn = fn(f32) -> Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColormapName {
    #[default]
    Inferno,
    Magma,
    Plasma,
    Viridis,
    Grayscale,
}

impl ColormapName {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Plasma => "plasma",
            Self::Viridis => "viridis",
            Self::Grayscale => "grayscale",
        }
    }
}

impl fmt::Display for ColormapName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ColormapName {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inferno" => Ok(Self::Inferno),
            "magma" => Ok(Self::Magma),
            "plasma" => Ok(Self::Plasma),
            "viridis" => Ok(Self::Viridis),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Self::Grayscale),
            _ => Err(ThermalError::UnknownColormap(s.to_string())),
        }
    }
}

/// Resolves `name` to its color function.
pub fn get_colormap(name: ColormapName) -> ColormapFn {
    match name {
        ColormapName::Inferno => inferno,
        ColormapName::Magma => magma,
        ColormapName::Plasma => plasma,
        ColormapName::Viridis => viridis,
        ColormapName::Grayscale => grayscale,
    }
}

fn inferno(t: f32) -> Rgb {
    sample(colorous::INFERNO, t)
}

fn magma(t: f32) -> Rgb {
    sample(colorous::MAGMA, t)
}

fn plasma(t: f32) -> Rgb {
    sample(colorous::PLASMA, t)
}

fn viridis(t: f32) -> Rgb {
    sample(colorous::VIRIDIS, t)
}

fn grayscale(t: f32) -> Rgb {
    let v = (clamp_position(t) * 255.0).round() as u8;
    Rgb::new(v, v, v)
}

fn sample(gradient: colorous::Gradient, t: f32) -> Rgb {
    gradient.eval_continuous(clamp_position(t) as f64).into()
}

fn clamp_position(t: f32) -> f32 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}
