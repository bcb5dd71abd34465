//! Frame and intensity grid types

use crate::thermal_pipeline::common::error::{Result, ThermalError};

/// One decoded camera frame.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in rows
    pub height: usize,
    /// Pixel data interleaved [c0, c1, c2, c0, c1, c2, ...], row-major
    pub data: Vec<u8>,
}

impl RawFrame {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self { width, height, data }
    }

    /// Frame where every pixel is `[c0, c1, c2]`.
    pub fn filled(width: usize, height: usize, pixel: [u8; 3]) -> Self {
        let data = pixel.iter().copied().cycle().take(width * height * 3).collect();
        Self { width, height, data }
    }

    /// Channel triple at (`x`, `y`). Panics when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let offset = (y * self.width + x) * 3;
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: [u8; 3]) {
        let offset = (y * self.width + x) * 3;
        self.data[offset..offset + 3].copy_from_slice(&pixel);
    }
}

/// Single-channel 8-bit grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityChannel {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// An intensity grid after downsampling and contrast adjustment.
pub type ConditionedMatrix = IntensityChannel;

impl IntensityChannel {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            return Err(ThermalError::ShapeMismatch {
                expected_width: width,
                expected_height: height,
                expected_len: width * height,
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self { width, height, data: vec![value; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// New grid of the same shape with `f` applied to every value.
    pub fn map_values(&self, f: impl Fn(u8) -> u8) -> IntensityChannel {
        IntensityChannel {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.width.max(1)).take(self.height)
    }

    pub fn min(&self) -> u8 {
        self.data.iter().copied().min().unwrap_or(0)
    }

    pub fn max(&self) -> u8 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Arithmetic mean, 0.0 for an empty grid.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.data.iter().map(|&v| v as u64).sum();
        sum as f64 / self.data.len() as f64
    }

    pub fn std_dev(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self.data.iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>() / self.data.len() as f64;
        variance.sqrt()
    }

    /// 256-bin histogram of intensity levels.
    pub fn histogram(&self) -> [u32; 256] {
        let mut bins = [0u32; 256];
        for &v in &self.data {
            bins[v as usize] += 1;
        }
        bins
    }
}
