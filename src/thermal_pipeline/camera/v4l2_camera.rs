//! V4L2 capture with memory-mapped streaming.
//!
//! The capture mode is set with `v4l2-ctl`, then YUYV frames are dequeued
//! from an mmap stream and converted to 3-channel pixels.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tracing::{debug, info};
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::Device;
use v4l::video::Capture;
use v4l::FourCC;

use crate::thermal_pipeline::camera::source::Camera;
use crate::thermal_pipeline::camera::yuyv;
use crate::thermal_pipeline::common::error::{Result, ThermalError};
use crate::thermal_pipeline::frame::{RawFrame, FRAME_HEIGHT, FRAME_WIDTH};

pub const DEFAULT_DEVICE: &str = "/dev/video0";

/// Driver buffers queued for streaming.
const BUFFER_COUNT: u32 = 4;

/// A dequeue that takes longer than this is reported as a missed frame.
const DEQUEUE_TIMEOUT: Duration = Duration::from_secs(2);

pub struct V4l2Camera {
    device: PathBuf,
    width: usize,
    height: usize,
}

/// Running mmap stream. Dropping it stops streaming and unmaps the buffers.
pub struct V4l2Stream {
    stream: Stream<'static>,
    _device: Device,
}

impl V4l2Camera {
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            width: FRAME_WIDTH,
            height: FRAME_HEIGHT,
        }
    }

    pub fn device(&self) -> &Path {
        &self.device
    }

    fn check_format(&self, device: &Device) -> Result<()> {
        let format = device.format().map_err(|e| {
            ThermalError::StreamOpen(format!("{}: querying format: {}", self.device.display(), e))
        })?;

        let dims = (format.width as usize, format.height as usize);
        if dims != (self.width, self.height) || format.fourcc != FourCC::new(b"YUYV") {
            return Err(ThermalError::StreamOpen(format!(
                "{}: device delivers {}x{} {}, expected {}x{} YUYV",
                self.device.display(),
                format.width,
                format.height,
                format.fourcc,
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

impl Default for V4l2Camera {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE)
    }
}

impl Camera for V4l2Camera {
    type Stream = V4l2Stream;

    fn configure(&mut self, width: usize, height: usize) -> Result<()> {
        info!(device = %self.device.display(), width, height, "Setting camera to dual mode");

        let output = Command::new("v4l2-ctl")
            .arg("-d")
            .arg(&self.device)
            .arg(format!("--set-fmt-video=width={},height={},pixelformat=YUYV", width, height))
            .output()
            .map_err(|e| ThermalError::CameraConfigure(format!("failed to run v4l2-ctl: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ThermalError::CameraConfigure(format!(
                "v4l2-ctl exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        self.width = width;
        self.height = height;
        info!("Camera mode set successfully");
        Ok(())
    }

    fn open_stream(&mut self) -> Result<V4l2Stream> {
        let device = Device::with_path(&self.device).map_err(|e| {
            ThermalError::StreamOpen(format!("{}: {}", self.device.display(), e))
        })?;
        self.check_format(&device)?;

        let mut stream = Stream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT)
            .map_err(|e| {
                ThermalError::StreamOpen(format!("{}: mapping buffers: {}", self.device.display(), e))
            })?;
        stream.set_timeout(DEQUEUE_TIMEOUT);

        debug!(device = %self.device.display(), buffers = BUFFER_COUNT, "Started mmap stream");
        Ok(V4l2Stream { stream, _device: device })
    }

    fn read_frame(&mut self, stream: &mut V4l2Stream) -> Result<RawFrame> {
        let (buffer, meta) = stream.stream
            .next()
            .map_err(|e| classify_read_error(&self.device, e))?;

        let used = meta.bytesused as usize;
        let payload = if used > 0 && used <= buffer.len() { &buffer[..used] } else { buffer };
        frame_from_buffer(payload, self.width, self.height)
    }

    fn release(&mut self, stream: V4l2Stream) {
        drop(stream);
        debug!(device = %self.device.display(), "Stopped camera stream");
    }
}

/// Decodes a dequeued buffer. Drivers may pad the buffer past the image;
/// a buffer shorter than one frame is a dropped frame.
pub fn frame_from_buffer(buffer: &[u8], width: usize, height: usize) -> Result<RawFrame> {
    let expected = width * height * yuyv::BYTES_PER_PIXEL;
    if buffer.len() < expected {
        return Err(ThermalError::FrameRead(format!(
            "short frame: {} of {} bytes",
            buffer.len(),
            expected
        )));
    }
    yuyv::decode(&buffer[..expected], width, height)
}

/// Timeouts and interrupted dequeues are retried; any other device error
/// (unplugged camera, unsupported I/O) ends the capture.
fn classify_read_error(device: &Path, error: io::Error) -> ThermalError {
    let message = format!("{}: {}", device.display(), error);
    match error.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => {
            ThermalError::FrameRead(message)
        }
        _ => ThermalError::CaptureFailed(message),
    }
}
