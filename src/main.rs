use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};
use thermal_ascii::logger;
use thermal_ascii::thermal_pipeline::{
    AcquisitionLoop, Camera, ColormapName, GlyphRamp, SyntheticCamera, TerminalSink,
    ThermalPipeline, V4l2Camera, VisualizerConfig, capture_single_frame, probe,
    camera::DEFAULT_DEVICE, render::DEFAULT_GLYPH_RAMP,
};

use tracing::{error, info};

/// Real-time thermal ASCII visualizer for 256x392 dual-mode thermal cameras
#[derive(Parser, Debug)]
#[command(name = "thermal-ascii", version)]
struct Cli {
    /// Video device node
    #[arg(long, default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// Downsample factor (1 = full resolution, 4 = quarter)
    #[arg(long, default_value_t = 4)]
    downsample: usize,

    /// Contrast enhancement factor
    #[arg(long, default_value_t = 1.5)]
    contrast: f32,

    /// Colormap: inferno, magma, plasma, viridis or grayscale
    #[arg(long, default_value = "inferno")]
    colormap: ColormapName,

    /// Glyphs from emptiest to fullest
    #[arg(long, default_value = DEFAULT_GLYPH_RAMP)]
    glyphs: GlyphRamp,

    /// Hide the statistics overlay
    #[arg(long)]
    no_stats: bool,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Use a generated test pattern instead of the camera
    #[arg(long)]
    synthetic: bool,

    /// Capture one frame, print its band layout analysis and exit
    #[arg(long)]
    probe: bool,
}

fn main() -> ExitCode {
    logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = VisualizerConfig::builder()
        .downsample(cli.downsample)
        .contrast(cli.contrast)
        .colormap(cli.colormap)
        .glyph_ramp(cli.glyphs)
        .show_stats(!cli.no_stats)
        .frame_limit(cli.frames)
        .build();

    if cli.probe {
        return if cli.synthetic {
            print_probe(&mut SyntheticCamera::new(), &config)
        } else {
            print_probe(&mut V4l2Camera::new(cli.device), &config)
        };
    }

    let pipeline = ThermalPipeline::new(config).context("Invalid visualizer settings")?;

    let stop = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&stop))
            .with_context(|| format!("Failed to install handler for signal {}", signal))?;
    }

    info!("Starting visualization, press Ctrl+C to stop");
    info!(
        "Downsample: {}x, contrast: {:.1}x, colormap: {}",
        pipeline.config().downsample,
        pipeline.config().contrast,
        pipeline.config().colormap
    );

    let mut sink = TerminalSink::stdout();
    let mut acquisition = AcquisitionLoop::new(pipeline);
    let summary = if cli.synthetic {
        acquisition.run(&mut SyntheticCamera::new(), &mut sink, &stop)
    } else {
        acquisition.run(&mut V4l2Camera::new(cli.device), &mut sink, &stop)
    }
    .context("Visualization failed")?;

    info!(
        frames = summary.frames,
        failed_reads = summary.failed_reads,
        "Total frames: {}",
        summary.frames
    );
    Ok(())
}

fn print_probe<C: Camera>(camera: &mut C, config: &VisualizerConfig) -> Result<()> {
    let frame = capture_single_frame(camera, 5, config.retry_backoff)
        .context("Failed to capture a frame")?;
    let report = probe(&frame, config.thermal_channel).context("Frame analysis failed")?;
    println!("{}", report);
    Ok(())
}
