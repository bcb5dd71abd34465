use crate::thermal_pipeline::frame::IntensityChannel;

/// Scales each value's distance from the grid mean by `factor`.
///
/// `out = clamp(round(m + factor * (v - m)), 0, 255)`. A factor of 1.0
/// reproduces the input and 0.0 flattens the grid to its rounded mean.
pub fn contrast_adjust(channel: &IntensityChannel, factor: f32) -> IntensityChannel {
    let mean = channel.mean();
    let factor = factor as f64;

    channel.map_values(|v| {
        let stretched = mean + factor * (v as f64 - mean);
        stretched.round().clamp(0.0, 255.0) as u8
    })
}
