//! Filter keys and the transform each one applies to the base layer.

use crate::effects::color_matrix::{ColorMatrix, grayscale_matrix, invert_matrix, sepia_matrix};

/// User-selectable filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    Blur,
}

impl FilterKey {
    /// Every key, in the order a picker shows them.
    pub const ALL: [FilterKey; 5] = [
        FilterKey::None,
        FilterKey::Grayscale,
        FilterKey::Sepia,
        FilterKey::Invert,
        FilterKey::Blur,
    ];

    /// Parse a key. Anything unrecognized falls back to [`FilterKey::None`].
    pub fn parse(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "grayscale" => Self::Grayscale,
            "sepia" => Self::Sepia,
            "invert" => Self::Invert,
            "blur" => Self::Blur,
            _ => Self::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Invert => "invert",
            Self::Blur => "blur",
        }
    }

    pub fn transform(self) -> FilterTransform {
        match self {
            Self::None => FilterTransform::Identity,
            Self::Grayscale => FilterTransform::ColorMatrix(grayscale_matrix(1.0)),
            Self::Sepia => FilterTransform::ColorMatrix(sepia_matrix(SEPIA_AMOUNT)),
            Self::Invert => FilterTransform::ColorMatrix(invert_matrix(1.0)),
            Self::Blur => FilterTransform::blur_px(BLUR_STD_DEV_PX),
        }
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const SEPIA_AMOUNT: f32 = 0.8;
const BLUR_STD_DEV_PX: f32 = 3.0;

/// Pixel operation applied to the whole base layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterTransform {
    Identity,
    ColorMatrix(ColorMatrix),
    Blur { radius_px: u32, sigma: f32 },
}

impl FilterTransform {
    /// Gaussian blur with the given standard deviation; the kernel spans three sigmas.
    pub fn blur_px(sigma: f32) -> Self {
        let radius_px = (sigma * 3.0).ceil().max(0.0) as u32;
        if radius_px == 0 {
            return Self::Identity;
        }
        Self::Blur { radius_px, sigma }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
