//! Signal conditioning module
//!
//! Downsampling and contrast normalisation applied to an extracted channel
//! before it is rendered.

mod downsample;
mod contrast;

pub use downsample::downsample;
pub use contrast::contrast_adjust;

use crate::thermal_pipeline::common::error::Result;
use crate::thermal_pipeline::frame::{ConditionedMatrix, IntensityChannel};

/// Runs the full chain: downsample by `factor`, then stretch around the mean.
pub fn condition(channel: &IntensityChannel, factor: usize, contrast: f32) -> Result<ConditionedMatrix> {
    let reduced = downsample(channel, factor)?;
    Ok(contrast_adjust(&reduced, contrast))
}
