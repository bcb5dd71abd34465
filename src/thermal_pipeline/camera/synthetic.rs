use tracing::debug;

use crate::thermal_pipeline::camera::source::Camera;
use crate::thermal_pipeline::common::error::{Result, ThermalError};
use crate::thermal_pipeline::frame::{Band, FrameGeometry, RawFrame, FRAME_HEIGHT, FRAME_WIDTH};

/// Deterministic hardware-free source: a warm spot circling over a cool
/// vertical gradient.
#[derive(Debug, Default)]
pub struct SyntheticCamera {
    frame_index: u64,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_frame(&mut self) -> RawFrame {
        let phase = self.frame_index as f32 * 0.05;
        self.frame_index += 1;

        let thermal_rows = FrameGeometry::row_count(Band::PrimaryThermal) as f32;
        let center_x = FRAME_WIDTH as f32 * (0.5 + 0.3 * phase.cos());
        let center_y = thermal_rows * (0.5 + 0.3 * phase.sin());
        let radius = thermal_rows / 5.0;

        let mut frame = RawFrame::filled(FRAME_WIDTH, FRAME_HEIGHT, [0, 0, 0]);
        let secondary_offset = FrameGeometry::region_for(Band::SecondaryThermal).0;

        for y in FrameGeometry::rows(Band::PrimaryThermal) {
            for x in 0..FRAME_WIDTH {
                let background = 40.0 + 60.0 * (y as f32 / thermal_rows);
                let dx = x as f32 - center_x;
                let dy = y as f32 - center_y;
                let heat = 150.0 * (-(dx * dx + dy * dy) / (2.0 * radius * radius)).exp();
                let level = (background + heat).round().clamp(0.0, 255.0) as u8;

                frame.set_pixel(x, y, [0, level, 0]);
                frame.set_pixel(x, y + secondary_offset, [level, level, level]);
            }
        }

        // Metadata rows carry the frame counter
        let counter = self.frame_index.to_le_bytes();
        for band in [Band::MetadataA, Band::MetadataB] {
            for y in FrameGeometry::rows(band) {
                for (x, byte) in counter.iter().enumerate() {
                    frame.set_pixel(x, y, [*byte, *byte, *byte]);
                }
            }
        }

        frame
    }
}

impl Camera for SyntheticCamera {
    type Stream = ();

    fn configure(&mut self, width: usize, height: usize) -> Result<()> {
        if (width, height) != (FRAME_WIDTH, FRAME_HEIGHT) {
            return Err(ThermalError::CameraConfigure(format!(
                "synthetic source only produces {}x{} frames, requested {}x{}",
                FRAME_WIDTH, FRAME_HEIGHT, width, height
            )));
        }
        Ok(())
    }

    fn open_stream(&mut self) -> Result<()> {
        debug!("Opening synthetic stream");
        Ok(())
    }

    fn read_frame(&mut self, _stream: &mut ()) -> Result<RawFrame> {
        Ok(self.next_frame())
    }

    fn release(&mut self, _stream: ()) {
        debug!(frames = self.frame_index, "Closing synthetic stream");
    }
}
