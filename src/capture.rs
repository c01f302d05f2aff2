//! Still photos taken from the composited canvas.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{BoothError, BoothResult};
use crate::render::pipeline::FrameRGBA;

/// Album-unique photo handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhotoId(pub u64);

/// One captured still, stored encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedPhoto {
    pub id: PhotoId,
    pub width: u32,
    pub height: u32,
    /// PNG-encoded bytes.
    pub png: Arc<Vec<u8>>,
}

impl CapturedPhoto {
    pub fn file_name(&self) -> String {
        format!("photo-{:04}.png", self.id.0)
    }
}

/// In-memory photo list, kept in capture order.
#[derive(Debug, Default)]
pub struct PhotoAlbum {
    photos: Vec<CapturedPhoto>,
    next_id: u64,
}

impl PhotoAlbum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `frame` and append it.
    pub fn push_frame(&mut self, frame: &FrameRGBA) -> BoothResult<PhotoId> {
        let png = encode_png(frame)?;
        let id = PhotoId(self.next_id);
        self.next_id += 1;
        self.photos.push(CapturedPhoto {
            id,
            width: frame.width,
            height: frame.height,
            png: Arc::new(png),
        });
        Ok(id)
    }

    pub fn get(&self, id: PhotoId) -> Option<&CapturedPhoto> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn remove(&mut self, id: PhotoId) -> bool {
        let before = self.photos.len();
        self.photos.retain(|p| p.id != id);
        before != self.photos.len()
    }

    pub fn clear(&mut self) {
        self.photos.clear();
    }

    pub fn photos(&self) -> &[CapturedPhoto] {
        &self.photos
    }

    pub fn latest(&self) -> Option<&CapturedPhoto> {
        self.photos.last()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Write every photo into `dir` (created if missing); returns the written paths.
    pub fn export_to_dir(&self, dir: &Path) -> BoothResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create photo dir '{}'", dir.display()))?;
        let mut out = Vec::with_capacity(self.photos.len());
        for p in &self.photos {
            let path = dir.join(p.file_name());
            std::fs::write(&path, p.png.as_slice())
                .with_context(|| format!("write photo '{}'", path.display()))?;
            out.push(path);
        }
        Ok(out)
    }
}

/// Encode a frame as PNG (straight alpha).
pub fn encode_png(frame: &FrameRGBA) -> BoothResult<Vec<u8>> {
    if frame.data.len()
        != (frame.width as usize)
            .saturating_mul(frame.height as usize)
            .saturating_mul(4)
    {
        return Err(BoothError::render("frame byte len mismatch"));
    }
    let rgba = frame.to_straight_rgba8();
    let mut out = Vec::new();
    image::write_buffer_with_format(
        &mut std::io::Cursor::new(&mut out),
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .context("encode png")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/unit/capture/album.rs"]
mod tests;
