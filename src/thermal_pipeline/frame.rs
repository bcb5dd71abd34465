//! Frame layout module
//!
//! Describes the fixed dual-mode frame layout and slices raw frames into
//! single-channel intensity grids.

pub mod geometry;
pub mod types;
mod extractor;

pub use geometry::{Band, FrameGeometry, FRAME_WIDTH, FRAME_HEIGHT, CHANNELS};
pub use types::{RawFrame, IntensityChannel, ConditionedMatrix};
pub use extractor::extract;
