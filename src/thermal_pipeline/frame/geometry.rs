//! Fixed band layout of the 256x392 dual-mode frame.

use std::fmt;
use std::ops::Range;

/// Width of every dual-mode frame in pixels.
pub const FRAME_WIDTH: usize = 256;
/// Height of every dual-mode frame in rows.
pub const FRAME_HEIGHT: usize = 392;
/// Interleaved 8-bit channels per pixel.
pub const CHANNELS: usize = 3;

/// A named horizontal band of the frame, listed top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// Raw thermal intensity, carried on the green channel.
    PrimaryThermal,
    /// Sensor metadata rows, opaque.
    MetadataA,
    /// Alternate thermal rendering produced by the sensor. Not displayed.
    SecondaryThermal,
    /// Trailing sensor metadata rows, opaque.
    MetadataB,
}

impl Band {
    pub const ALL: [Band; 4] = [
        Band::PrimaryThermal,
        Band::MetadataA,
        Band::SecondaryThermal,
        Band::MetadataB,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Band::PrimaryThermal => "primaryThermal",
            Band::MetadataA => "metadataA",
            Band::SecondaryThermal => "secondaryThermal",
            Band::MetadataB => "metadataB",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed table of band boundaries.
///
/// The boundaries are constants of the sensor. A different sensor means
/// editing this table, never inferring bands from frame content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry;

impl FrameGeometry {
    pub const WIDTH: usize = FRAME_WIDTH;
    pub const HEIGHT: usize = FRAME_HEIGHT;

    /// Row range `[start, end)` of `band`.
    pub const fn region_for(band: Band) -> (usize, usize) {
        match band {
            Band::PrimaryThermal => (0, 192),
            Band::MetadataA => (192, 195),
            Band::SecondaryThermal => (195, 387),
            Band::MetadataB => (387, 392),
        }
    }

    pub fn rows(band: Band) -> Range<usize> {
        let (start, end) = Self::region_for(band);
        start..end
    }

    pub fn row_count(band: Band) -> usize {
        let (start, end) = Self::region_for(band);
        end - start
    }

    /// Number of bytes in one packed 3-channel frame.
    pub const fn frame_len() -> usize {
        FRAME_WIDTH * FRAME_HEIGHT * CHANNELS
    }
}
