use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{BoothError, BoothResult};
use crate::render::layout::centered_rect;

/// Session-unique sticker handle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct StickerId(pub u64);

/// A positioned, uniformly scaled image overlay.
///
/// `image` is `None` while the upload is still decoding; such stickers are not drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Sticker {
    pub id: StickerId,
    pub image: Option<PreparedImage>,
    /// Center of the sticker in canvas coordinates.
    pub center: Point,
    pub scale: f64,
}

impl Sticker {
    pub fn new(id: StickerId, center: Point, scale: f64) -> BoothResult<Self> {
        validate_center(center)?;
        Ok(Self {
            id,
            image: None,
            center,
            scale: validate_scale(scale)?,
        })
    }

    pub fn with_image(mut self, image: PreparedImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.image.is_some()
    }

    /// Drawn bounds, or `None` while the image is pending.
    pub fn bounds(&self) -> Option<Rect> {
        let img = self.image.as_ref()?;
        Some(centered_rect(self.center, img.width, img.height, self.scale))
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds().is_some_and(|r| r.contains(p))
    }

    pub fn set_scale(&mut self, scale: f64) -> BoothResult<()> {
        self.scale = validate_scale(scale)?;
        Ok(())
    }

    pub fn move_to(&mut self, center: Point) -> BoothResult<()> {
        validate_center(center)?;
        self.center = center;
        Ok(())
    }
}

fn validate_scale(scale: f64) -> BoothResult<f64> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(BoothError::validation(format!(
            "sticker scale must be finite and > 0, got {scale}"
        )));
    }
    Ok(scale)
}

fn validate_center(p: Point) -> BoothResult<()> {
    if !p.x.is_finite() || !p.y.is_finite() {
        return Err(BoothError::validation("sticker position must be finite"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/sticker.rs"]
mod tests;
