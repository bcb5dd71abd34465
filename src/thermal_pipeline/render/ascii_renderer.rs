use std::fmt;

use crate::thermal_pipeline::colormap::{ColorTable, Rgb};
use crate::thermal_pipeline::frame::ConditionedMatrix;
use crate::thermal_pipeline::render::ansi;
use crate::thermal_pipeline::render::glyphs::GlyphRamp;

/// One display cell. Printed as two glyphs to square up terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Rgb,
}

/// Glyph and color composition of one matrix, one row per matrix row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderFrame {
    pub rows: Vec<Vec<Cell>>,
}

impl RenderFrame {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// Text block with embedded 24-bit color escapes.
    pub fn to_ansi(&self) -> String {
        // escape (up to 19) + two glyphs (up to 6) + reset (4)
        let mut out = String::with_capacity(self.height() * (self.width() * 29 + 1));
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for cell in row {
                ansi::push_foreground(&mut out, cell.color);
                out.push(cell.glyph);
                out.push(cell.glyph);
                out.push_str(ansi::RESET);
            }
        }
        out
    }
}

impl fmt::Display for RenderFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ansi())
    }
}

/// Maps every intensity to its table color and ramp glyph.
pub fn render(matrix: &ConditionedMatrix, table: &ColorTable, ramp: &GlyphRamp) -> RenderFrame {
    let rows = matrix.rows()
        .map(|row| {
            row.iter()
                .map(|&v| Cell {
                    glyph: ramp.glyph_for(v),
                    color: table.lookup(v),
                })
                .collect()
        })
        .collect();

    RenderFrame { rows }
}
