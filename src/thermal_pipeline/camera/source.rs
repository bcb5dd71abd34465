use tracing::debug;

use crate::thermal_pipeline::common::error::{Result, ThermalError};
use crate::thermal_pipeline::frame::RawFrame;

/// A device that produces dual-mode frames.
///
/// `configure` and `open_stream` failures are fatal to startup;
/// `read_frame` failures are expected to be transient.
pub trait Camera {
    type Stream;

    fn configure(&mut self, width: usize, height: usize) -> Result<()>;
    fn open_stream(&mut self) -> Result<Self::Stream>;
    fn read_frame(&mut self, stream: &mut Self::Stream) -> Result<RawFrame>;
    fn release(&mut self, stream: Self::Stream);
}

/// An open stream that is released exactly once, when dropped.
pub struct OpenStream<'a, C: Camera> {
    camera: &'a mut C,
    stream: Option<C::Stream>,
}

impl<'a, C: Camera> OpenStream<'a, C> {
    pub fn open(camera: &'a mut C) -> Result<Self> {
        let stream = camera.open_stream()?;
        debug!("Camera stream opened");
        Ok(Self { camera, stream: Some(stream) })
    }

    pub fn read_frame(&mut self) -> Result<RawFrame> {
        match self.stream.as_mut() {
            Some(stream) => self.camera.read_frame(stream),
            None => Err(ThermalError::FrameRead("stream already released".to_string())),
        }
    }
}

impl<C: Camera> Drop for OpenStream<'_, C> {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.camera.release(stream);
            debug!("Camera stream released");
        }
    }
}
