use tracing::trace;

use crate::thermal_pipeline::common::error::{Result, ThermalError};
use crate::thermal_pipeline::frame::geometry::{Band, FrameGeometry, CHANNELS, FRAME_HEIGHT, FRAME_WIDTH};
use crate::thermal_pipeline::frame::types::{IntensityChannel, RawFrame};

/// Copies one channel of `band` out of `frame`.
///
/// The frame must be exactly 256x392 with a fully populated buffer; any
/// other shape is rejected before a single pixel is read. The result is a
/// new grid that never aliases the frame.
pub fn extract(frame: &RawFrame, band: Band, channel: usize) -> Result<IntensityChannel> {
    validate_shape(frame)?;
    if channel >= CHANNELS {
        return Err(ThermalError::ChannelOutOfRange(channel));
    }

    let rows = FrameGeometry::rows(band);
    let height = rows.len();
    let stride = FRAME_WIDTH * CHANNELS;
    let band_bytes = &frame.data[rows.start * stride..rows.end * stride];

    let data: Vec<u8> = band_bytes
        .chunks_exact(CHANNELS)
        .map(|pixel| pixel[channel])
        .collect();

    trace!(band = %band, channel, height, "Extracted band");
    IntensityChannel::new(FRAME_WIDTH, height, data)
}

fn validate_shape(frame: &RawFrame) -> Result<()> {
    let expected_len = FrameGeometry::frame_len();
    if frame.width != FRAME_WIDTH || frame.height != FRAME_HEIGHT || frame.data.len() != expected_len {
        return Err(ThermalError::ShapeMismatch {
            expected_width: FRAME_WIDTH,
            expected_height: FRAME_HEIGHT,
            expected_len,
            width: frame.width,
            height: frame.height,
            len: frame.data.len(),
        });
    }
    Ok(())
}
