use crate::thermal_pipeline::frame::ConditionedMatrix;

/// Column count of the rule printed between image and statistics.
pub const SEPARATOR_WIDTH: usize = 80;

/// Fixed-format statistics overlay. Does not touch the matrix.
pub fn render_stats(
    matrix: &ConditionedMatrix,
    fps: f64,
    contrast: f32,
    downsample: usize,
    original_dims: (usize, usize),
) -> String {
    let (original_width, original_height) = original_dims;
    [
        format!("FPS: {:.1}", fps),
        format!(
            "Min: {}  Max: {}  Mean: {:.1}",
            matrix.min(),
            matrix.max(),
            matrix.mean()
        ),
        format!(
            "Size: {}x{} (downsampled {}x from {}x{})",
            matrix.width(),
            matrix.height(),
            downsample,
            original_width,
            original_height
        ),
        format!("Contrast: {:.1}x", contrast),
        String::new(),
        "Press Ctrl+C to stop".to_string(),
    ]
    .join("\n")
}
