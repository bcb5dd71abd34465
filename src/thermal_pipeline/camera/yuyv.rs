//! Packed YUYV 4:2:2 to 3-channel conversion.
//!
//! Output pixels are ordered [blue, green, red] so channel 1 carries the
//! green signal of the thermal band.

use crate::thermal_pipeline::common::error::{Result, ThermalError};
use crate::thermal_pipeline::frame::RawFrame;

/// Bytes per pixel in a packed YUYV buffer.
pub const BYTES_PER_PIXEL: usize = 2;

/// Converts one `width x height` YUYV buffer using BT.601 video-range
/// coefficients.
pub fn decode(buffer: &[u8], width: usize, height: usize) -> Result<RawFrame> {
    let expected_len = width * height * BYTES_PER_PIXEL;
    if buffer.len() != expected_len || width % 2 != 0 {
        return Err(ThermalError::ShapeMismatch {
            expected_width: width,
            expected_height: height,
            expected_len,
            width,
            height,
            len: buffer.len(),
        });
    }

    let mut data = Vec::with_capacity(width * height * 3);
    for macro_pixel in buffer.chunks_exact(4) {
        let [y0, u, y1, v] = [macro_pixel[0], macro_pixel[1], macro_pixel[2], macro_pixel[3]];
        data.extend_from_slice(&to_bgr(y0, u, v));
        data.extend_from_slice(&to_bgr(y1, u, v));
    }

    Ok(RawFrame::new(width, height, data))
}

fn to_bgr(y: u8, u: u8, v: u8) -> [u8; 3] {
    let c = 1.164 * (y as f32 - 16.0);
    let d = u as f32 - 128.0;
    let e = v as f32 - 128.0;

    let r = c + 1.596 * e;
    let g = c - 0.391 * d - 0.813 * e;
    let b = c + 2.018 * d;

    [saturate(b), saturate(g), saturate(r)]
}

fn saturate(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
