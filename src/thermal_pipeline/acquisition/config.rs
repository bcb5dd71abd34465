//! Visualizer configuration types

use std::time::Duration;

use crate::thermal_pipeline::colormap::ColormapName;
use crate::thermal_pipeline::common::error::{Result, ThermalError};
use crate::thermal_pipeline::frame::{Band, FrameGeometry, CHANNELS};
use crate::thermal_pipeline::render::GlyphRamp;

/// Runtime knobs of the visualizer
#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    /// Integer reduction applied to both dimensions (1 = full resolution)
    pub downsample: usize,
    /// Contrast stretch around the frame mean (1.0 = unchanged)
    pub contrast: f32,
    /// Colormap the lookup table is built from
    pub colormap: ColormapName,
    /// Glyphs from emptiest to fullest
    pub glyph_ramp: GlyphRamp,
    /// Channel of the primary thermal band carrying the signal
    pub thermal_channel: usize,
    /// Whether to append the statistics overlay below the image
    pub show_stats: bool,
    /// Pause after each displayed frame so the terminal keeps up
    pub frame_delay: Duration,
    /// Pause after a failed capture before retrying
    pub retry_backoff: Duration,
    /// Stop after this many displayed frames
    pub frame_limit: Option<u64>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            downsample: 4,
            contrast: 1.5,
            colormap: ColormapName::Inferno,
            glyph_ramp: GlyphRamp::default(),
            thermal_channel: 1,
            show_stats: true,
            frame_delay: Duration::from_millis(10),
            retry_backoff: Duration::from_millis(100),
            frame_limit: None,
        }
    }
}

impl VisualizerConfig {
    pub fn builder() -> VisualizerConfigBuilder {
        VisualizerConfigBuilder::default()
    }

    /// Rejects settings that would make the pipeline misbehave.
    pub fn validate(&self) -> Result<()> {
        let max_factor = FrameGeometry::row_count(Band::PrimaryThermal);
        if self.downsample == 0 || self.downsample > max_factor {
            return Err(ThermalError::InvalidDownsampleFactor(self.downsample));
        }
        if !self.contrast.is_finite() || self.contrast < 0.0 {
            return Err(ThermalError::InvalidContrastFactor(self.contrast));
        }
        if self.thermal_channel >= CHANNELS {
            return Err(ThermalError::ChannelOutOfRange(self.thermal_channel));
        }
        Ok(())
    }
}

/// Builder for VisualizerConfig
#[derive(Default)]
pub struct VisualizerConfigBuilder {
    downsample: Option<usize>,
    contrast: Option<f32>,
    colormap: Option<ColormapName>,
    glyph_ramp: Option<GlyphRamp>,
    thermal_channel: Option<usize>,
    show_stats: Option<bool>,
    frame_delay: Option<Duration>,
    retry_backoff: Option<Duration>,
    frame_limit: Option<Option<u64>>,
}

impl VisualizerConfigBuilder {
    pub fn downsample(mut self, factor: usize) -> Self {
        self.downsample = Some(factor);
        self
    }

    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = Some(factor);
        self
    }

    pub fn colormap(mut self, colormap: ColormapName) -> Self {
        self.colormap = Some(colormap);
        self
    }

    pub fn glyph_ramp(mut self, ramp: GlyphRamp) -> Self {
        self.glyph_ramp = Some(ramp);
        self
    }

    pub fn thermal_channel(mut self, channel: usize) -> Self {
        self.thermal_channel = Some(channel);
        self
    }

    pub fn show_stats(mut self, enable: bool) -> Self {
        self.show_stats = Some(enable);
        self
    }

    pub fn frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = Some(delay);
        self
    }

    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = Some(backoff);
        self
    }

    pub fn frame_limit(mut self, limit: Option<u64>) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    pub fn build(self) -> VisualizerConfig {
        let default = VisualizerConfig::default();
        VisualizerConfig {
            downsample: self.downsample.unwrap_or(default.downsample),
            contrast: self.contrast.unwrap_or(default.contrast),
            colormap: self.colormap.unwrap_or(default.colormap),
            glyph_ramp: self.glyph_ramp.unwrap_or(default.glyph_ramp),
            thermal_channel: self.thermal_channel.unwrap_or(default.thermal_channel),
            show_stats: self.show_stats.unwrap_or(default.show_stats),
            frame_delay: self.frame_delay.unwrap_or(default.frame_delay),
            retry_backoff: self.retry_backoff.unwrap_or(default.retry_backoff),
            frame_limit: self.frame_limit.unwrap_or(default.frame_limit),
        }
    }
}
