//! Camera module
//!
//! Frame sources behind a single fallible interface, plus the scoped
//! stream guard that guarantees release.

mod source;
mod v4l2_camera;
mod synthetic;
pub mod yuyv;

pub use source::{Camera, OpenStream};
pub use v4l2_camera::{frame_from_buffer, V4l2Camera, V4l2Stream, DEFAULT_DEVICE};
pub use synthetic::SyntheticCamera;
