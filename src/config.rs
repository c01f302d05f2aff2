//! JSON scene description consumed by the CLI.
//!
//! Asset paths are resolved relative to an assets root, normally the directory holding the JSON
//! file. Images are decoded eagerly so a broken asset fails the command instead of being
//! recorded as a session message.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::camera::error::CameraError;
use crate::camera::permission::{FixedPermission, PermissionState};
use crate::camera::stream::{CameraProvider, FileCamera, UnavailableCamera};
use crate::effects::filter::FilterKey;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{BoothError, BoothResult};
use crate::session::BoothSession;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoothConfig {
    #[serde(default)]
    pub canvas: Canvas,
    /// Filter key; unknown keys select no filter.
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub camera: CameraConfig,
    /// Permission reported by the platform before the camera is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<PermissionState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<PathBuf>,
    #[serde(default)]
    pub stickers: Vec<StickerConfig>,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::BOOTH,
            filter: String::new(),
            camera: CameraConfig::None,
            permission: None,
            background: None,
            frame: None,
            stickers: Vec::new(),
        }
    }
}

/// Which camera the session requests at start-up.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraConfig {
    /// No camera is requested.
    #[default]
    None,
    Denied,
    NotFound,
    Unsupported,
    /// Replay still images as camera frames.
    File {
        frames: Vec<PathBuf>,
        #[serde(default)]
        warmup_ticks: u32,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StickerConfig {
    pub source: PathBuf,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl BoothConfig {
    pub fn from_json_str(s: &str) -> BoothResult<Self> {
        serde_json::from_str(s).map_err(|e| BoothError::serde(format!("parse booth config: {e}")))
    }

    pub fn from_path(path: &Path) -> BoothResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read booth config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> BoothResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BoothError::serde(e.to_string()))
    }

    pub fn filter_key(&self) -> FilterKey {
        FilterKey::parse(&self.filter)
    }

    pub fn validate(&self) -> BoothResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if !self.filter.trim().is_empty() && self.filter_key() == FilterKey::None {
            tracing::warn!(filter = %self.filter, "unknown filter key, using none");
        }
        for (i, s) in self.stickers.iter().enumerate() {
            if !s.scale.is_finite() || s.scale <= 0.0 {
                return Err(BoothError::validation(format!(
                    "stickers[{i}].scale must be finite and > 0"
                )));
            }
            if !s.x.is_finite() || !s.y.is_finite() {
                return Err(BoothError::validation(format!(
                    "stickers[{i}] position must be finite"
                )));
            }
        }
        if let CameraConfig::File { frames, .. } = &self.camera
            && frames.is_empty()
        {
            return Err(BoothError::validation(
                "file camera needs at least one frame",
            ));
        }
        Ok(())
    }

    /// Provider for the configured camera, or `None` when no camera is requested.
    pub fn camera_provider(&self, root: &Path) -> BoothResult<Option<Box<dyn CameraProvider>>> {
        let provider: Box<dyn CameraProvider> = match &self.camera {
            CameraConfig::None => return Ok(None),
            CameraConfig::Denied => Box::new(UnavailableCamera(CameraError::PermissionDenied)),
            CameraConfig::NotFound => Box::new(UnavailableCamera(CameraError::NoDevice)),
            CameraConfig::Unsupported => Box::new(UnavailableCamera(CameraError::Unsupported)),
            CameraConfig::File {
                frames,
                warmup_ticks,
            } => {
                let paths: Vec<PathBuf> = frames.iter().map(|p| root.join(p)).collect();
                Box::new(FileCamera::open(paths.as_slice(), *warmup_ticks)?)
            }
        };
        Ok(Some(provider))
    }

    /// Build a session with every configured asset decoded and the camera requested.
    pub fn build_session(&self, root: &Path) -> BoothResult<BoothSession> {
        self.validate()?;
        let mut session = BoothSession::new(self.canvas);
        if let Some(p) = self.permission {
            session = session.with_permission_probe(&FixedPermission(p));
        }
        session.set_filter(self.filter_key());

        if let Some(p) = &self.background {
            session.set_background(load_image(root, p)?);
        }
        if let Some(p) = &self.frame {
            session.set_frame(load_image(root, p)?);
        }
        for s in &self.stickers {
            session.add_sticker(load_image(root, &s.source)?, Point::new(s.x, s.y), s.scale)?;
        }

        if let Some(mut provider) = self.camera_provider(root)? {
            session.request_camera(provider.as_mut());
        }
        tracing::debug!(?session, "session built from config");
        Ok(session)
    }
}

fn load_image(root: &Path, rel: &Path) -> BoothResult<PreparedImage> {
    let path = root.join(rel);
    let bytes =
        std::fs::read(&path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../tests/unit/config/booth_config.rs"]
mod tests;
