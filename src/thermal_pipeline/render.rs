//! Rendering module
//!
//! Turns a conditioned intensity matrix into colored text and hands the
//! composed block to a display sink.

pub mod ansi;
mod glyphs;
mod ascii_renderer;
mod stats;
mod sink;

pub use glyphs::{GlyphRamp, DEFAULT_GLYPH_RAMP};
pub use ascii_renderer::{render, Cell, RenderFrame};
pub use stats::{render_stats, SEPARATOR_WIDTH};
pub use sink::{DisplaySink, TerminalSink};
