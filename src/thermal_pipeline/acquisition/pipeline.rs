use tracing::{debug, instrument};

use crate::thermal_pipeline::{
    acquisition::config::VisualizerConfig,
    colormap::{ColorTable, DEFAULT_LEVELS},
    common::error::Result,
    conditioning,
    frame::{extract, Band, ConditionedMatrix, FrameGeometry, RawFrame, FRAME_WIDTH},
    render::{render, render_stats, RenderFrame, SEPARATOR_WIDTH},
};

/// Extract, condition and render stages with their shared, read-only
/// lookup state.
pub struct ThermalPipeline {
    config: VisualizerConfig,
    table: ColorTable,
}

impl ThermalPipeline {
    /// Validates `config` and builds the color table once.
    pub fn new(config: VisualizerConfig) -> Result<Self> {
        config.validate()?;
        let table = ColorTable::build(config.colormap, DEFAULT_LEVELS)?;
        Ok(Self { config, table })
    }

    #[instrument(level = "debug", skip(self, frame))]
    pub fn process(&self, frame: &RawFrame) -> Result<ConditionedMatrix> {
        let channel = {
            let _span = tracing::debug_span!("extract").entered();
            extract(frame, Band::PrimaryThermal, self.config.thermal_channel)?
        };

        let matrix = {
            let _span = tracing::debug_span!("condition",
                downsample = self.config.downsample,
                contrast = self.config.contrast
            ).entered();
            conditioning::condition(&channel, self.config.downsample, self.config.contrast)?
        };

        debug!(
            width = matrix.width(),
            height = matrix.height(),
            "Conditioned thermal band"
        );
        Ok(matrix)
    }

    pub fn render(&self, matrix: &ConditionedMatrix) -> RenderFrame {
        let _span = tracing::debug_span!("render").entered();
        render(matrix, &self.table, &self.config.glyph_ramp)
    }

    /// Full display block: the colored image, then the statistics overlay
    /// under a rule when enabled.
    pub fn compose(&self, matrix: &ConditionedMatrix, fps: f64) -> String {
        let mut text = self.render(matrix).to_ansi();
        if self.config.show_stats {
            text.push_str("\n\n");
            text.push_str(&"─".repeat(SEPARATOR_WIDTH));
            text.push('\n');
            text.push_str(&render_stats(
                matrix,
                fps,
                self.config.contrast,
                self.config.downsample,
                (FRAME_WIDTH, FrameGeometry::row_count(Band::PrimaryThermal)),
            ));
        }
        text
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn color_table(&self) -> &ColorTable {
        &self.table
    }
}
