//! Colormap module
//!
//! Perceptual colormaps and the precomputed 256-entry lookup table the
//! renderer reads from.

pub mod provider;
mod table;

pub use provider::{ColormapFn, ColormapName, Rgb, get_colormap};
pub use table::{ColorTable, DEFAULT_LEVELS};
