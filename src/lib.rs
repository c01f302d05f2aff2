//! Photo booth compositing.
//!
//! A [`BoothSession`] owns everything a draw depends on: the camera stream, an optional
//! background, the selected filter, stickers and a decorative frame. Each draw runs the same
//! pipeline:
//!
//! - resolve the base layer (ready camera frame, else background, else a placeholder)
//! - filter the base layer
//! - draw stickers in insertion order, then the frame on top
//!
//! [`render_composite`] is a pure function of its [`RenderInputs`]; the session only mutates
//! between draws. [`BoothSession::capture`] renders once and keeps the result as a PNG in the
//! session's [`PhotoAlbum`].
#![forbid(unsafe_code)]

mod assets;
mod camera;
mod capture;
mod config;
mod effects;
mod foundation;
mod render;
mod session;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{BoothError, BoothResult};

pub use crate::assets::decode::{MAX_IMAGE_DIM, PreparedImage, decode_image};
pub use crate::assets::upload::{UploadEvent, UploadTarget, Uploader};
pub use crate::camera::error::CameraError;
pub use crate::camera::permission::{
    FixedPermission, PermissionProbe, PermissionState, initial_permission,
};
pub use crate::camera::stream::{CameraProvider, FileCamera, FileStream, LiveStream, UnavailableCamera};
pub use crate::capture::{CapturedPhoto, PhotoAlbum, PhotoId, encode_png};
pub use crate::config::{BoothConfig, CameraConfig, StickerConfig};
pub use crate::effects::blur::blur_rgba8_premul;
pub use crate::effects::color_matrix::{
    ColorMatrix, IDENTITY_MATRIX, color_matrix_rgba8_premul, grayscale_matrix, invert_matrix,
    sepia_matrix,
};
pub use crate::effects::filter::{FilterKey, FilterTransform};
pub use crate::render::layout::{
    PLACEHOLDER_HINT, PLACEHOLDER_TITLE, TextLine, cover_rect, placeholder_lines,
};
pub use crate::render::pipeline::{FrameRGBA, RenderInputs, apply_filter, render_composite};
pub use crate::render::source::{VisualSource, resolve_source};
pub use crate::session::{BoothSession, Sticker, StickerId};
