//! Thermal frame pipeline
//!
//! Decodes 256x392 dual-mode thermal camera frames, isolates the raw thermal
//! band, conditions it and renders it as colored terminal text.

pub mod common;
pub mod frame;
pub mod conditioning;
pub mod colormap;
pub mod render;
pub mod camera;
pub mod acquisition;

pub use common::{
    ThermalError,
    Result,
};

pub use frame::{
    Band,
    FrameGeometry,
    RawFrame,
    IntensityChannel,
    ConditionedMatrix,
    extract,
};

pub use conditioning::{
    condition,
    contrast_adjust,
    downsample,
};

pub use colormap::{
    ColorTable,
    ColormapName,
    Rgb,
    get_colormap,
};

pub use render::{
    DisplaySink,
    GlyphRamp,
    RenderFrame,
    TerminalSink,
    render,
    render_stats,
};

pub use camera::{
    Camera,
    OpenStream,
    SyntheticCamera,
    V4l2Camera,
};

pub use acquisition::{
    AcquisitionLoop,
    FrameReport,
    LoopState,
    LoopSummary,
    ThermalPipeline,
    VisualizerConfig,
    VisualizerConfigBuilder,
    capture_single_frame,
    probe,
};
