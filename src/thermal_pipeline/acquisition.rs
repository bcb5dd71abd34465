//! Acquisition module
//!
//! Orchestrates capture, conditioning and rendering: the per-frame pipeline,
//! the cooperative capture loop and the one-shot frame probe.

mod config;
mod pipeline;
mod timing;
mod acquisition_loop;
mod probe;
mod tests;

pub use config::{VisualizerConfig, VisualizerConfigBuilder};
pub use pipeline::ThermalPipeline;
pub use timing::{FpsTracker, FPS_WINDOW};
pub use acquisition_loop::{AcquisitionLoop, LoopState, LoopSummary};
pub use probe::{capture_single_frame, probe, BandReport, FrameReport, ThermalSummary};
