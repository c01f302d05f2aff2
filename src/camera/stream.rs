use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::camera::error::CameraError;
use crate::foundation::error::{BoothError, BoothResult};

/// An attached camera stream.
///
/// A stream may exist before it can present a frame; [`LiveStream::current_frame`] returns
/// `None` until enough data is buffered.
pub trait LiveStream: Send {
    /// Human-readable device label, used in logs.
    fn label(&self) -> &str;

    /// Pull the next frame from the device. Called once per tick.
    fn advance(&mut self);

    /// The frame to present now, if the stream is ready.
    fn current_frame(&self) -> Option<&PreparedImage>;

    /// Release the device. Must be idempotent.
    fn stop(&mut self);

    fn is_stopped(&self) -> bool;
}

/// Something that can hand out camera streams.
pub trait CameraProvider {
    fn request_camera(&mut self) -> Result<Box<dyn LiveStream>, CameraError>;
}

/// Provider that always fails with the same classified error.
#[derive(Clone, Debug)]
pub struct UnavailableCamera(pub CameraError);

impl CameraProvider for UnavailableCamera {
    fn request_camera(&mut self) -> Result<Box<dyn LiveStream>, CameraError> {
        Err(self.0.clone())
    }
}

/// Virtual camera that replays a fixed list of decoded frames.
///
/// `warmup_ticks` models device start-up: the stream exists but is not ready for that many
/// ticks.
#[derive(Clone, Debug)]
pub struct FileCamera {
    label: String,
    frames: Arc<[PreparedImage]>,
    warmup_ticks: u32,
}

impl FileCamera {
    pub fn new(label: impl Into<String>, frames: Vec<PreparedImage>, warmup_ticks: u32) -> Self {
        Self {
            label: label.into(),
            frames: frames.into(),
            warmup_ticks,
        }
    }

    /// Decode every frame file up front.
    pub fn open<P: AsRef<Path>>(paths: &[P], warmup_ticks: u32) -> BoothResult<Self> {
        let mut frames = Vec::with_capacity(paths.len());
        for p in paths {
            let p = p.as_ref();
            let bytes = std::fs::read(p)
                .with_context(|| format!("read camera frame '{}'", p.display()))
                .map_err(BoothError::from)?;
            frames.push(decode_image(&bytes)?);
        }
        let label = paths
            .first()
            .map(|p| p.as_ref().display().to_string())
            .unwrap_or_else(|| "file-camera".to_owned());
        Ok(Self::new(label, frames, warmup_ticks))
    }
}

impl CameraProvider for FileCamera {
    fn request_camera(&mut self) -> Result<Box<dyn LiveStream>, CameraError> {
        if self.frames.is_empty() {
            return Err(CameraError::NoDevice);
        }
        Ok(Box::new(FileStream {
            label: self.label.clone(),
            frames: Arc::clone(&self.frames),
            ticks: 0,
            warmup_ticks: self.warmup_ticks,
            stopped: false,
        }))
    }
}

/// Stream handed out by [`FileCamera`].
#[derive(Debug)]
pub struct FileStream {
    label: String,
    frames: Arc<[PreparedImage]>,
    ticks: u32,
    warmup_ticks: u32,
    stopped: bool,
}

impl LiveStream for FileStream {
    fn label(&self) -> &str {
        &self.label
    }

    fn advance(&mut self) {
        if !self.stopped {
            self.ticks = self.ticks.saturating_add(1);
        }
    }

    fn current_frame(&self) -> Option<&PreparedImage> {
        if self.stopped || self.ticks < self.warmup_ticks || self.frames.is_empty() {
            return None;
        }
        let i = ((self.ticks - self.warmup_ticks) as usize) % self.frames.len();
        self.frames.get(i)
    }

    fn stop(&mut self) {
        if !self.stopped {
            tracing::debug!(label = %self.label, "stop camera stream");
        }
        self.stopped = true;
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/stream.rs"]
mod tests;
