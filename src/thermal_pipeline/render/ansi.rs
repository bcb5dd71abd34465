//! ANSI escape primitives consumed by the terminal sink.

use std::fmt::Write;

use crate::thermal_pipeline::colormap::Rgb;

pub const RESET: &str = "\x1b[0m";
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Appends the 24-bit foreground escape `ESC[38;2;R;G;Bm`.
pub fn push_foreground(out: &mut String, color: Rgb) {
    // Writing into a String cannot fail
    let _ = write!(out, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
}

pub fn foreground(color: Rgb) -> String {
    let mut out = String::with_capacity(19);
    push_foreground(&mut out, color);
    out
}
