use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThermalError {
    #[error("Frame shape mismatch: expected {expected_width}x{expected_height} ({expected_len} bytes), got {width}x{height} ({len} bytes)")]
    ShapeMismatch {
        expected_width: usize,
        expected_height: usize,
        expected_len: usize,
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("Channel index {0} out of range (frames carry 3 channels)")]
    ChannelOutOfRange(usize),

    #[error("Invalid downsample factor: {0}")]
    InvalidDownsampleFactor(usize),

    #[error("Invalid contrast factor: {0}")]
    InvalidContrastFactor(f32),

    #[error("Invalid number of color levels: {0}")]
    InvalidColorLevels(usize),

    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),

    #[error("Invalid glyph ramp: {0}")]
    InvalidGlyphRamp(String),

    #[error("Failed to configure camera mode: {0}")]
    CameraConfigure(String),

    #[error("Failed to open camera stream: {0}")]
    StreamOpen(String),

    #[error("Failed to read frame: {0}")]
    FrameRead(String),

    #[error("Camera capture failed: {0}")]
    CaptureFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ThermalError {
    /// Per-frame capture failures are retried; everything else ends the run.
    pub fn is_transient(&self) -> bool {
        matches!(self, ThermalError::FrameRead(_))
    }
}

pub type Result<T> = std::result::Result<T, ThermalError>;
