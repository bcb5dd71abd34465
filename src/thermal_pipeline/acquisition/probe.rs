//! One-shot frame analysis used to check a camera's dual-mode layout.

use std::fmt;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::thermal_pipeline::{
    camera::{Camera, OpenStream},
    common::error::{Result, ThermalError},
    frame::{extract, Band, FrameGeometry, RawFrame, CHANNELS, FRAME_HEIGHT, FRAME_WIDTH},
};

/// Per-band channel statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct BandReport {
    pub band: Band,
    pub rows: (usize, usize),
    pub channel_means: [f64; CHANNELS],
    pub min: u8,
    pub max: u8,
}

/// Statistics of the thermal signal channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalSummary {
    pub channel: usize,
    pub min: u8,
    pub max: u8,
    pub mean: f64,
    pub std_dev: f64,
    pub histogram_peak: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub width: usize,
    pub height: usize,
    pub bands: Vec<BandReport>,
    pub thermal: ThermalSummary,
}

/// Summarises every band of `frame` and the thermal signal on `channel`.
pub fn probe(frame: &RawFrame, channel: usize) -> Result<FrameReport> {
    if channel >= CHANNELS {
        return Err(ThermalError::ChannelOutOfRange(channel));
    }

    let mut bands = Vec::with_capacity(Band::ALL.len());
    for band in Band::ALL {
        let mut channel_means = [0.0; CHANNELS];
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        for (index, mean) in channel_means.iter_mut().enumerate() {
            let values = extract(frame, band, index)?;
            *mean = values.mean();
            min = min.min(values.min());
            max = max.max(values.max());
        }
        bands.push(BandReport {
            band,
            rows: FrameGeometry::region_for(band),
            channel_means,
            min,
            max,
        });
    }

    let thermal = extract(frame, Band::PrimaryThermal, channel)?;
    let histogram = thermal.histogram();
    // max_by_key returns the last maximum; ties resolve to the lowest level
    let histogram_peak = histogram
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, count)| **count)
        .map_or(0, |(level, _)| level as u8);

    Ok(FrameReport {
        width: frame.width,
        height: frame.height,
        bands,
        thermal: ThermalSummary {
            channel,
            min: thermal.min(),
            max: thermal.max(),
            mean: thermal.mean(),
            std_dev: thermal.std_dev(),
            histogram_peak,
        },
    })
}

/// Configures `camera`, reads one frame, and releases the stream.
///
/// Transient read failures are retried up to `attempts` times.
pub fn capture_single_frame<C: Camera>(camera: &mut C, attempts: usize, backoff: Duration) -> Result<RawFrame> {
    camera.configure(FRAME_WIDTH, FRAME_HEIGHT)?;
    let mut stream = OpenStream::open(camera)?;

    let mut attempt = 0;
    loop {
        attempt += 1;
        match stream.read_frame() {
            Ok(frame) => {
                info!(width = frame.width, height = frame.height, "Frame captured");
                return Ok(frame);
            }
            Err(e) if e.is_transient() && attempt < attempts => {
                warn!(attempt, "Failed to capture frame: {}", e);
                thread::sleep(backoff);
            }
            Err(e) => return Err(e),
        }
    }
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Frame Analysis ===")?;
        writeln!(f, "Frame size: {}x{}", self.width, self.height)?;
        for band in &self.bands {
            let (start, end) = band.rows;
            writeln!(f)?;
            writeln!(f, "{} (rows {}-{}, {} lines)", band.band, start, end - 1, end - start)?;
            writeln!(
                f,
                "  Mean per channel: c0={:.1} c1={:.1} c2={:.1}",
                band.channel_means[0], band.channel_means[1], band.channel_means[2]
            )?;
            writeln!(f, "  Min/Max: {}-{}", band.min, band.max)?;
        }
        writeln!(f)?;
        writeln!(f, "=== Thermal Channel {} Stats ===", self.thermal.channel)?;
        writeln!(
            f,
            "Min: {}, Max: {}, Mean: {:.1}",
            self.thermal.min, self.thermal.max, self.thermal.mean
        )?;
        writeln!(f, "Std: {:.1}", self.thermal.std_dev)?;
        write!(f, "Histogram peak at intensity: {}", self.thermal.histogram_peak)
    }
}
