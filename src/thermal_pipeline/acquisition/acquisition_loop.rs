use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::thermal_pipeline::{
    acquisition::pipeline::ThermalPipeline,
    acquisition::timing::{FpsTracker, FPS_WINDOW},
    camera::{Camera, OpenStream},
    common::error::Result,
    frame::{FRAME_HEIGHT, FRAME_WIDTH},
    render::DisplaySink,
};

/// Longest uninterrupted sleep while waiting for a stop request.
const SLEEP_SLICE: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSummary {
    pub frames: u64,
    pub failed_reads: u64,
    pub fps: f64,
}

/// Single-threaded capture, render and display loop.
///
/// `Idle -> Running` once the camera is configured and its stream opened;
/// `Running -> Stopped` on a stop request, the frame limit, or a fatal
/// error. The stream is released on every exit path.
pub struct AcquisitionLoop {
    pipeline: ThermalPipeline,
    state: LoopState,
    frames: u64,
    failed_reads: u64,
    fps: FpsTracker,
}

impl AcquisitionLoop {
    pub fn new(pipeline: ThermalPipeline) -> Self {
        Self {
            pipeline,
            state: LoopState::Idle,
            frames: 0,
            failed_reads: 0,
            fps: FpsTracker::new(FPS_WINDOW, Instant::now()),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn summary(&self) -> LoopSummary {
        LoopSummary {
            frames: self.frames,
            failed_reads: self.failed_reads,
            fps: self.fps.fps(),
        }
    }

    /// Runs until `stop` is raised. Startup failures return before the loop
    /// ever enters `Running`.
    pub fn run<C: Camera, S: DisplaySink>(
        &mut self,
        camera: &mut C,
        sink: &mut S,
        stop: &AtomicBool,
    ) -> Result<LoopSummary> {
        if self.state != LoopState::Idle {
            warn!(state = ?self.state, "Acquisition loop already used");
            return Ok(self.summary());
        }

        if let Err(e) = camera.configure(FRAME_WIDTH, FRAME_HEIGHT) {
            error!("Camera configuration failed: {}", e);
            self.transition(LoopState::Stopped);
            return Err(e);
        }

        let result = match OpenStream::open(camera) {
            Ok(mut stream) => {
                self.transition(LoopState::Running);
                self.fps = FpsTracker::new(FPS_WINDOW, Instant::now());
                // dropping the stream at the end of this arm releases it
                self.drive(&mut stream, sink, stop)
            }
            Err(e) => {
                error!("Could not open camera: {}", e);
                self.transition(LoopState::Stopped);
                return Err(e);
            }
        };
        self.transition(LoopState::Stopped);

        let summary = self.summary();
        if let Err(e) = &result {
            error!("Acquisition stopped: {}", e);
        }
        let report = sink.clear().and_then(|_| {
            sink.present(&format!("Total frames: {}\nVisualization stopped", summary.frames))
        });

        result?;
        report?;
        info!(frames = summary.frames, failed_reads = summary.failed_reads, "Visualization stopped");
        Ok(summary)
    }

    fn drive<C: Camera, S: DisplaySink>(
        &mut self,
        stream: &mut OpenStream<'_, C>,
        sink: &mut S,
        stop: &AtomicBool,
    ) -> Result<()> {
        let config = self.pipeline.config();
        let frame_delay = config.frame_delay;
        let retry_backoff = config.retry_backoff;
        let frame_limit = config.frame_limit;

        sink.clear()?;
        loop {
            if stop.load(Ordering::SeqCst) {
                info!("Stop requested");
                return Ok(());
            }
            if frame_limit.is_some_and(|limit| self.frames >= limit) {
                info!(frames = self.frames, "Frame limit reached");
                return Ok(());
            }

            let frame = match stream.read_frame() {
                Ok(frame) => frame,
                Err(e) if e.is_transient() => {
                    self.failed_reads += 1;
                    warn!("Failed to capture frame: {}", e);
                    sleep_unless_stopped(retry_backoff, stop);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let matrix = self.pipeline.process(&frame)?;
            self.frames += 1;
            let fps = self.fps.record_frame(Instant::now());
            let text = self.pipeline.compose(&matrix, fps);

            sink.clear()?;
            sink.present(&text)?;

            sleep_unless_stopped(frame_delay, stop);
        }
    }

    fn transition(&mut self, to: LoopState) {
        info!(from = ?self.state, to = ?to, "Acquisition state change");
        self.state = to;
    }
}

fn sleep_unless_stopped(duration: Duration, stop: &AtomicBool) {
    let deadline = Instant::now() + duration;
    loop {
        let now = Instant::now();
        if now >= deadline || stop.load(Ordering::SeqCst) {
            return;
        }
        thread::sleep((deadline - now).min(SLEEP_SLICE));
    }
}
