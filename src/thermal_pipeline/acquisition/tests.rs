#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use crate::thermal_pipeline::acquisition::{
        AcquisitionLoop, LoopState, ThermalPipeline, VisualizerConfig, capture_single_frame,
    };
    use crate::thermal_pipeline::camera::Camera;
    use crate::thermal_pipeline::colormap::ColormapName;
    use crate::thermal_pipeline::common::error::{Result, ThermalError};
    use crate::thermal_pipeline::frame::{Band, FrameGeometry, RawFrame, FRAME_HEIGHT, FRAME_WIDTH};
    use crate::thermal_pipeline::render::{DisplaySink, GlyphRamp};

    enum Step {
        Frame,
        Fail,
        Misshapen,
        DeviceLost,
    }

    struct MockCamera {
        script: VecDeque<Step>,
        stop: Arc<AtomicBool>,
        fail_configure: bool,
        fail_open: bool,
        opened: usize,
        reads: usize,
        released: usize,
    }

    impl MockCamera {
        fn new(script: Vec<Step>, stop: Arc<AtomicBool>) -> Self {
            Self {
                script: script.into(),
                stop,
                fail_configure: false,
                fail_open: false,
                opened: 0,
                reads: 0,
                released: 0,
            }
        }
    }

    impl Camera for MockCamera {
        type Stream = u32;

        fn configure(&mut self, width: usize, height: usize) -> Result<()> {
            assert_eq!((width, height), (FRAME_WIDTH, FRAME_HEIGHT));
            if self.fail_configure {
                return Err(ThermalError::CameraConfigure("Mock configure error".to_string()));
            }
            Ok(())
        }

        fn open_stream(&mut self) -> Result<u32> {
            if self.fail_open {
                return Err(ThermalError::StreamOpen("Mock open error".to_string()));
            }
            self.opened += 1;
            Ok(7)
        }

        fn read_frame(&mut self, stream: &mut u32) -> Result<RawFrame> {
            assert_eq!(*stream, 7);
            self.reads += 1;
            let step = self.script.pop_front().unwrap_or(Step::Frame);
            // The interrupt arrives while the last scripted read is in flight
            if self.script.is_empty() {
                self.stop.store(true, Ordering::SeqCst);
            }
            match step {
                Step::Frame => Ok(green_frame(128)),
                Step::Fail => Err(ThermalError::FrameRead("Mock read error".to_string())),
                Step::Misshapen => Ok(RawFrame::filled(FRAME_WIDTH, 384, [0, 0, 0])),
                Step::DeviceLost => {
                    Err(ThermalError::CaptureFailed("Mock no such device".to_string()))
                }
            }
        }

        fn release(&mut self, stream: u32) {
            assert_eq!(stream, 7);
            self.released += 1;
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        clears: usize,
        presented: Vec<String>,
        fail_present: bool,
    }

    impl DisplaySink for RecordingSink {
        fn clear(&mut self) -> Result<()> {
            self.clears += 1;
            Ok(())
        }

        fn present(&mut self, text: &str) -> Result<()> {
            if self.fail_present {
                return Err(ThermalError::Io(std::io::Error::other("Mock broken pipe")));
            }
            self.presented.push(text.to_string());
            Ok(())
        }
    }

    /// Primary band filled with `level` on channel 1, everything else zero.
    fn green_frame(level: u8) -> RawFrame {
        let mut frame = RawFrame::filled(FRAME_WIDTH, FRAME_HEIGHT, [0, 0, 0]);
        for y in FrameGeometry::rows(Band::PrimaryThermal) {
            for x in 0..FRAME_WIDTH {
                frame.set_pixel(x, y, [0, level, 0]);
            }
        }
        frame
    }

    fn fast_config() -> VisualizerConfig {
        VisualizerConfig::builder()
            .frame_delay(Duration::ZERO)
            .retry_backoff(Duration::ZERO)
            .build()
    }

    fn new_loop(config: VisualizerConfig) -> AcquisitionLoop {
        AcquisitionLoop::new(ThermalPipeline::new(config).unwrap())
    }

    #[test]
    fn test_config_builder() {
        let config = VisualizerConfig::builder()
            .downsample(2)
            .contrast(0.5)
            .colormap(ColormapName::Viridis)
            .glyph_ramp(GlyphRamp::new(".:#").unwrap())
            .show_stats(false)
            .frame_limit(Some(5))
            .build();

        assert_eq!(config.downsample, 2);
        assert_eq!(config.contrast, 0.5);
        assert_eq!(config.colormap, ColormapName::Viridis);
        assert_eq!(config.glyph_ramp.len(), 3);
        assert!(!config.show_stats);
        assert_eq!(config.frame_limit, Some(5));
        assert_eq!(config.thermal_channel, 1);
    }

    #[test]
    fn test_default_config() {
        let config = VisualizerConfig::default();
        assert_eq!(config.downsample, 4);
        assert_eq!(config.contrast, 1.5);
        assert_eq!(config.colormap, ColormapName::Inferno);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let zero = VisualizerConfig::builder().downsample(0).build();
        assert!(matches!(ThermalPipeline::new(zero), Err(ThermalError::InvalidDownsampleFactor(0))));

        let huge = VisualizerConfig::builder().downsample(193).build();
        assert!(matches!(ThermalPipeline::new(huge), Err(ThermalError::InvalidDownsampleFactor(193))));

        let nan = VisualizerConfig::builder().contrast(f32::NAN).build();
        assert!(matches!(ThermalPipeline::new(nan), Err(ThermalError::InvalidContrastFactor(_))));

        let channel = VisualizerConfig::builder().thermal_channel(3).build();
        assert!(matches!(ThermalPipeline::new(channel), Err(ThermalError::ChannelOutOfRange(3))));
    }

    #[test]
    fn test_uniform_green_frame_end_to_end() {
        let config = VisualizerConfig::builder()
            .downsample(4)
            .contrast(1.0)
            .build();
        let pipeline = ThermalPipeline::new(config).unwrap();

        let matrix = pipeline.process(&green_frame(128)).unwrap();
        assert_eq!((matrix.width(), matrix.height()), (64, 48));
        assert!(matrix.data().iter().all(|&v| v == 128));

        let frame = pipeline.render(&matrix);
        let expected_color = pipeline.color_table().lookup(128);
        assert_eq!(frame.height(), 48);
        assert!(frame.rows.iter().flatten().all(|cell| cell.glyph == '▒' && cell.color == expected_color));
    }

    #[test]
    fn test_compose_with_and_without_stats() {
        let pipeline = ThermalPipeline::new(fast_config()).unwrap();
        let matrix = pipeline.process(&green_frame(100)).unwrap();

        let text = pipeline.compose(&matrix, 12.5);
        assert!(text.contains(&"─".repeat(80)));
        assert!(text.contains("Size: 64x48 (downsampled 4x from 256x192)"));
        assert!(text.contains("Contrast: 1.5x"));

        let quiet = ThermalPipeline::new(VisualizerConfig::builder().show_stats(false).build()).unwrap();
        let text = quiet.compose(&matrix, 12.5);
        assert!(!text.contains("FPS"));
        assert_eq!(text.lines().count(), 48);
    }

    #[test]
    fn test_failed_read_is_skipped_and_loop_continues() {
        let stop = Arc::new(AtomicBool::new(false));
        let mut script: Vec<Step> = (0..10).map(|_| Step::Frame).collect();
        script[2] = Step::Fail;
        let mut camera = MockCamera::new(script, stop.clone());
        let mut sink = RecordingSink::default();
        let mut acquisition = new_loop(fast_config());

        let summary = acquisition.run(&mut camera, &mut sink, &stop).unwrap();

        assert_eq!(camera.reads, 10);
        assert_eq!(summary.frames, 9);
        assert_eq!(summary.failed_reads, 1);
        assert_eq!(camera.released, 1);
        assert_eq!(acquisition.state(), LoopState::Stopped);
        // nine frames plus the closing summary
        assert_eq!(sink.presented.len(), 10);
        assert_eq!(sink.presented.last().unwrap(), "Total frames: 9\nVisualization stopped");
    }

    #[test]
    fn test_interrupt_before_first_frame_releases_once() {
        let stop = Arc::new(AtomicBool::new(true));
        let mut camera = MockCamera::new(vec![Step::Frame], stop.clone());
        let mut sink = RecordingSink::default();
        let mut acquisition = new_loop(fast_config());

        let summary = acquisition.run(&mut camera, &mut sink, &stop).unwrap();

        assert_eq!(summary.frames, 0);
        assert_eq!(camera.opened, 1);
        assert_eq!(camera.reads, 0);
        assert_eq!(camera.released, 1);
    }

    #[test]
    fn test_interrupt_during_read_finishes_iteration_then_releases_once() {
        let stop = Arc::new(AtomicBool::new(false));
        let mut camera = MockCamera::new(vec![Step::Frame, Step::Frame], stop.clone());
        let mut sink = RecordingSink::default();
        let mut acquisition = new_loop(fast_config());

        let summary = acquisition.run(&mut camera, &mut sink, &stop).unwrap();

        assert_eq!(summary.frames, 2);
        assert_eq!(camera.released, 1);
    }

    #[test]
    fn test_interrupt_during_failed_read_releases_once() {
        let stop = Arc::new(AtomicBool::new(false));
        let mut camera = MockCamera::new(vec![Step::Frame, Step::Fail], stop.clone());
        let mut sink = RecordingSink::default();
        let mut acquisition = new_loop(fast_config());

        let summary = acquisition.run(&mut camera, &mut sink, &stop).unwrap();

        assert_eq!(summary.frames, 1);
        assert_eq!(summary.failed_reads, 1);
        assert_eq!(camera.released, 1);
    }

    #[test]
    fn test_misshapen_frame_terminates_loop() {
        let stop = Arc::new(AtomicBool::new(false));
        let mut camera = MockCamera::new(
            vec![Step::Frame, Step::Misshapen, Step::Frame, Step::Frame],
            stop.clone(),
        );
        let mut sink = RecordingSink::default();
        let mut acquisition = new_loop(fast_config());

        let result = acquisition.run(&mut camera, &mut sink, &stop);

        assert!(matches!(result, Err(ThermalError::ShapeMismatch { height: 384, .. })));
        assert_eq!(camera.reads, 2);
        assert_eq!(camera.released, 1);
        assert_eq!(acquisition.state(), LoopState::Stopped);
        assert_eq!(acquisition.summary().frames, 1);
    }

    #[test]
    fn test_lost_device_stops_instead_of_retrying() {
        let stop = Arc::new(AtomicBool::new(false));
        let mut camera = MockCamera::new(
            vec![Step::Frame, Step::DeviceLost, Step::Frame, Step::Frame],
            stop.clone(),
        );
        let mut sink = RecordingSink::default();
        let mut acquisition = new_loop(fast_config());

        let result = acquisition.run(&mut camera, &mut sink, &stop);

        assert!(matches!(result, Err(ThermalError::CaptureFailed(_))));
        assert_eq!(camera.reads, 2);
        assert_eq!(camera.released, 1);
        assert_eq!(acquisition.summary().failed_reads, 0);
        assert_eq!(acquisition.state(), LoopState::Stopped);
    }

    #[test]
    fn test_configure_failure_never_runs() {
        let stop = Arc::new(AtomicBool::new(false));
        let mut camera = MockCamera::new(vec![Step::Frame], stop.clone());
        camera.fail_configure = true;
        let mut sink = RecordingSink::default();
        let mut acquisition = new_loop(fast_config());

        let result = acquisition.run(&mut camera, &mut sink, &stop);

        assert!(matches!(result, Err(ThermalError::CameraConfigure(_))));
        assert_eq!(camera.opened, 0);
        assert_eq!(camera.released, 0);
        assert_eq!(sink.clears, 0);
        assert_eq!(acquisition.state(), LoopState::Stopped);
    }

    #[test]
    fn test_open_failure_never_runs() {
        let stop = Arc::new(AtomicBool::new(false));
        let mut camera = MockCamera::new(vec![Step::Frame], stop.clone());
        camera.fail_open = true;
        let mut sink = RecordingSink::default();
        let mut acquisition = new_loop(fast_config());

        let result = acquisition.run(&mut camera, &mut sink, &stop);

        assert!(matches!(result, Err(ThermalError::StreamOpen(_))));
        assert_eq!(camera.reads, 0);
        assert_eq!(camera.released, 0);
        assert!(sink.presented.is_empty());
    }

    #[test]
    fn test_sink_failure_still_releases() {
        let stop = Arc::new(AtomicBool::new(false));
        let mut camera = MockCamera::new(vec![Step::Frame, Step::Frame], stop.clone());
        let mut sink = RecordingSink { fail_present: true, ..Default::default() };
        let mut acquisition = new_loop(fast_config());

        let result = acquisition.run(&mut camera, &mut sink, &stop);

        assert!(matches!(result, Err(ThermalError::Io(_))));
        assert_eq!(camera.reads, 1);
        assert_eq!(camera.released, 1);
    }

    #[test]
    fn test_frame_limit_stops_loop() {
        let stop = Arc::new(AtomicBool::new(false));
        let script = (0..20).map(|_| Step::Frame).collect();
        let mut camera = MockCamera::new(script, stop.clone());
        let mut sink = RecordingSink::default();
        let config = VisualizerConfig::builder()
            .frame_delay(Duration::ZERO)
            .frame_limit(Some(3))
            .build();
        let mut acquisition = new_loop(config);

        let summary = acquisition.run(&mut camera, &mut sink, &stop).unwrap();

        assert_eq!(summary.frames, 3);
        assert_eq!(camera.reads, 3);
        assert_eq!(camera.released, 1);
    }

    #[test]
    fn test_stopped_loop_does_not_restart() {
        let stop = Arc::new(AtomicBool::new(true));
        let mut camera = MockCamera::new(vec![Step::Frame], stop.clone());
        let mut sink = RecordingSink::default();
        let mut acquisition = new_loop(fast_config());

        acquisition.run(&mut camera, &mut sink, &stop).unwrap();
        stop.store(false, Ordering::SeqCst);
        acquisition.run(&mut camera, &mut sink, &stop).unwrap();

        assert_eq!(camera.opened, 1);
        assert_eq!(camera.released, 1);
    }

    #[test]
    fn test_capture_single_frame_retries_transient_failures() {
        let stop = Arc::new(AtomicBool::new(false));
        let mut camera = MockCamera::new(vec![Step::Fail, Step::Fail, Step::Frame], stop);

        let frame = capture_single_frame(&mut camera, 3, Duration::ZERO).unwrap();

        assert_eq!(frame.height, FRAME_HEIGHT);
        assert_eq!(camera.reads, 3);
        assert_eq!(camera.released, 1);
    }

    #[test]
    fn test_capture_single_frame_gives_up() {
        let stop = Arc::new(AtomicBool::new(false));
        let mut camera = MockCamera::new(vec![Step::Fail, Step::Fail, Step::Frame], stop);

        let result = capture_single_frame(&mut camera, 2, Duration::ZERO);

        assert!(matches!(result, Err(ThermalError::FrameRead(_))));
        assert_eq!(camera.released, 1);
    }
}
