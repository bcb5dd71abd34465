use std::time::{Duration, Instant};

/// Frames per FPS sample.
pub const FPS_WINDOW: u64 = 10;

/// Rolling frame-rate estimate, refreshed once per window of frames.
#[derive(Debug, Clone)]
pub struct FpsTracker {
    window: u64,
    frames_in_window: u64,
    window_start: Instant,
    fps: f64,
}

impl FpsTracker {
    pub fn new(window: u64, start: Instant) -> Self {
        Self {
            window: window.max(1),
            frames_in_window: 0,
            window_start: start,
            fps: 0.0,
        }
    }

    /// Counts one displayed frame and returns the current estimate.
    pub fn record_frame(&mut self, now: Instant) -> f64 {
        self.frames_in_window += 1;
        if self.frames_in_window >= self.window {
            let elapsed = now.saturating_duration_since(self.window_start);
            if elapsed > Duration::ZERO {
                self.fps = self.window as f64 / elapsed.as_secs_f64();
            }
            self.window_start = now;
            self.frames_in_window = 0;
        }
        self.fps
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}
