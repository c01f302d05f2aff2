use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{BoothError, BoothResult};

/// Largest width or height the rasterizer can sample from.
pub const MAX_IMAGE_DIM: u32 = u16::MAX as u32;

/// A decoded, ready-to-draw image.
///
/// Cloning is cheap: pixel storage is shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> BoothResult<Self> {
        if width == 0 || height == 0 {
            return Err(BoothError::decode("image has zero width or height"));
        }
        check_drawable(width, height)?;
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BoothError::decode("image buffer size overflow"))?;
        if rgba.len() != expected {
            return Err(BoothError::decode(format!(
                "rgba8 buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// A single-color image; mostly useful for tests and synthetic camera frames.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> BoothResult<Self> {
        let px = (width as usize).saturating_mul(height as usize);
        Self::from_straight_rgba8(width, height, rgba.repeat(px))
    }

    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> BoothResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    check_drawable(dyn_img.width(), dyn_img.height())?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PreparedImage::from_straight_rgba8(width, height, rgba.into_raw())
}

fn check_drawable(width: u32, height: u32) -> BoothResult<()> {
    if width > MAX_IMAGE_DIM || height > MAX_IMAGE_DIM {
        return Err(BoothError::decode(format!(
            "image {width}x{height} exceeds {MAX_IMAGE_DIM}x{MAX_IMAGE_DIM}"
        )));
    }
    Ok(())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = (((*c as u32) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
