//! The booth's session state and every operation the UI performs on it.
//!
//! All mutation happens here, between draws. Rendering borrows the state immutably through
//! [`BoothSession::render_inputs`] and never changes it.

use std::path::PathBuf;

use crate::assets::decode::PreparedImage;
use crate::assets::upload::{UploadEvent, UploadTarget, Uploader};
use crate::camera::error::CameraError;
use crate::camera::permission::{PermissionProbe, PermissionState, initial_permission};
use crate::camera::stream::{CameraProvider, LiveStream};
use crate::capture::{PhotoAlbum, PhotoId};
use crate::effects::filter::FilterKey;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{BoothError, BoothResult};
use crate::render::pipeline::{FrameRGBA, RenderInputs, render_composite};
use crate::render::source::{VisualSource, resolve_source};
use crate::session::sticker::{Sticker, StickerId};

/// Explicit owner of everything a draw depends on.
pub struct BoothSession {
    canvas: Canvas,
    permission: PermissionState,
    error_message: Option<String>,
    stream: Option<Box<dyn LiveStream>>,
    filter: FilterKey,
    stickers: Vec<Sticker>,
    selected: Option<StickerId>,
    next_sticker_id: u64,
    background: Option<PreparedImage>,
    frame: Option<PreparedImage>,
    /// Newest upload still allowed to replace each slot; older results are stale.
    background_upload: Option<u64>,
    frame_upload: Option<u64>,
    uploader: Uploader,
    album: PhotoAlbum,
}

impl Default for BoothSession {
    fn default() -> Self {
        Self::new(Canvas::BOOTH)
    }
}

impl std::fmt::Debug for BoothSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoothSession")
            .field("canvas", &self.canvas)
            .field("permission", &self.permission)
            .field("stream", &self.stream.as_ref().map(|s| s.label().to_owned()))
            .field("filter", &self.filter)
            .field("stickers", &self.stickers.len())
            .field("background", &self.background.is_some())
            .field("frame", &self.frame.is_some())
            .field("photos", &self.album.len())
            .finish_non_exhaustive()
    }
}

impl BoothSession {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            permission: PermissionState::Unknown,
            error_message: None,
            stream: None,
            filter: FilterKey::None,
            stickers: Vec::new(),
            selected: None,
            next_sticker_id: 0,
            background: None,
            frame: None,
            background_upload: None,
            frame_upload: None,
            uploader: Uploader::new(),
            album: PhotoAlbum::new(),
        }
    }

    /// Seed the permission state from a platform probe.
    pub fn with_permission_probe(mut self, probe: &dyn PermissionProbe) -> Self {
        self.permission = initial_permission(probe);
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Ask `provider` for a stream. On success the previous stream is released and replaced;
    /// on failure the message and permission state are updated and any current stream stays.
    pub fn request_camera(&mut self, provider: &mut dyn CameraProvider) -> bool {
        self.error_message = None;
        match provider.request_camera() {
            Ok(stream) => {
                self.attach_stream(stream);
                self.permission = PermissionState::Granted;
                true
            }
            Err(err) => {
                self.on_camera_error(&err);
                false
            }
        }
    }

    /// Attach a stream, stopping the one it replaces before the new one is stored.
    pub fn attach_stream(&mut self, stream: Box<dyn LiveStream>) {
        self.release_camera();
        tracing::info!(label = stream.label(), "camera stream attached");
        self.stream = Some(stream);
    }

    /// Stop and drop the current stream, if any.
    pub fn release_camera(&mut self) {
        if let Some(mut old) = self.stream.take() {
            old.stop();
            tracing::debug!(label = old.label(), "camera stream released");
        }
    }

    fn on_camera_error(&mut self, err: &CameraError) {
        tracing::warn!(%err, "camera request failed");
        self.error_message = Some(err.user_message());
        self.permission = err.permission_after(self.permission);
    }

    /// Permission change notification from the platform.
    pub fn on_permission_change(&mut self, state: PermissionState) {
        tracing::debug!(from = %self.permission, to = %state, "permission changed");
        self.permission = state;
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Whether a ready camera frame would be drawn right now.
    pub fn has_live_video(&self) -> bool {
        matches!(self.visual_source(), VisualSource::LiveVideo(_))
    }

    /// Whether the UI should offer to retry the camera.
    pub fn shows_retry(&self) -> bool {
        !self.has_live_video() && self.permission != PermissionState::Unsupported
    }

    pub fn set_filter(&mut self, filter: FilterKey) {
        self.filter = filter;
    }

    /// Select a filter by key; unknown keys select no filter.
    pub fn set_filter_key(&mut self, key: &str) {
        self.filter = FilterKey::parse(key);
    }

    pub fn filter(&self) -> FilterKey {
        self.filter
    }

    /// Set the background directly; uploads still decoding are superseded.
    pub fn set_background(&mut self, img: PreparedImage) {
        self.background_upload = None;
        self.background = Some(img);
    }

    pub fn clear_background(&mut self) {
        self.background_upload = None;
        self.background = None;
    }

    pub fn background(&self) -> Option<&PreparedImage> {
        self.background.as_ref()
    }

    pub fn set_frame(&mut self, img: PreparedImage) {
        self.frame_upload = None;
        self.frame = Some(img);
    }

    pub fn clear_frame(&mut self) {
        self.frame_upload = None;
        self.frame = None;
    }

    pub fn frame(&self) -> Option<&PreparedImage> {
        self.frame.as_ref()
    }

    pub fn upload_background(&mut self, bytes: Vec<u8>) {
        let seq = self.uploader.submit_bytes(UploadTarget::Background, bytes);
        self.background_upload = Some(seq);
    }

    pub fn upload_background_path(&mut self, path: impl Into<PathBuf>) {
        let seq = self.uploader.submit_path(UploadTarget::Background, path);
        self.background_upload = Some(seq);
    }

    pub fn upload_frame(&mut self, bytes: Vec<u8>) {
        let seq = self.uploader.submit_bytes(UploadTarget::Frame, bytes);
        self.frame_upload = Some(seq);
    }

    pub fn upload_frame_path(&mut self, path: impl Into<PathBuf>) {
        let seq = self.uploader.submit_path(UploadTarget::Frame, path);
        self.frame_upload = Some(seq);
    }

    /// Add an already-decoded sticker on top of the others.
    pub fn add_sticker(
        &mut self,
        image: PreparedImage,
        center: Point,
        scale: f64,
    ) -> BoothResult<StickerId> {
        let id = self.push_sticker(center, scale)?;
        if let Some(s) = self.sticker_mut(id) {
            s.image = Some(image);
        }
        Ok(id)
    }

    /// Add a sticker whose image is still to be decoded. It is placed immediately and drawn
    /// once decoding finishes.
    pub fn upload_sticker(
        &mut self,
        bytes: Vec<u8>,
        center: Point,
        scale: f64,
    ) -> BoothResult<StickerId> {
        let id = self.push_sticker(center, scale)?;
        self.uploader.submit_bytes(UploadTarget::Sticker(id), bytes);
        Ok(id)
    }

    pub fn upload_sticker_path(
        &mut self,
        path: impl Into<PathBuf>,
        center: Point,
        scale: f64,
    ) -> BoothResult<StickerId> {
        let id = self.push_sticker(center, scale)?;
        self.uploader.submit_path(UploadTarget::Sticker(id), path);
        Ok(id)
    }

    fn push_sticker(&mut self, center: Point, scale: f64) -> BoothResult<StickerId> {
        let id = StickerId(self.next_sticker_id);
        let sticker = Sticker::new(id, center, scale)?;
        self.next_sticker_id += 1;
        self.stickers.push(sticker);
        self.selected = Some(id);
        Ok(id)
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn sticker(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    fn sticker_mut(&mut self, id: StickerId) -> Option<&mut Sticker> {
        self.stickers.iter_mut().find(|s| s.id == id)
    }

    fn require_sticker_mut(&mut self, id: StickerId) -> BoothResult<&mut Sticker> {
        self.sticker_mut(id)
            .ok_or_else(|| BoothError::validation(format!("no sticker with id {}", id.0)))
    }

    pub fn move_sticker(&mut self, id: StickerId, center: Point) -> BoothResult<()> {
        self.require_sticker_mut(id)?.move_to(center)
    }

    pub fn scale_sticker(&mut self, id: StickerId, scale: f64) -> BoothResult<()> {
        self.require_sticker_mut(id)?.set_scale(scale)
    }

    pub fn remove_sticker(&mut self, id: StickerId) -> bool {
        let before = self.stickers.len();
        self.stickers.retain(|s| s.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        before != self.stickers.len()
    }

    pub fn select_sticker(&mut self, id: Option<StickerId>) -> BoothResult<()> {
        if let Some(id) = id
            && self.sticker(id).is_none()
        {
            return Err(BoothError::validation(format!("no sticker with id {}", id.0)));
        }
        self.selected = id;
        Ok(())
    }

    /// Select the topmost drawn sticker under `p`, or clear the selection.
    pub fn select_at(&mut self, p: Point) -> Option<StickerId> {
        self.selected = self.stickers.iter().rev().find(|s| s.contains(p)).map(|s| s.id);
        self.selected
    }

    pub fn selected_sticker(&self) -> Option<StickerId> {
        self.selected
    }

    /// Advance the camera and apply finished uploads. Returns how many uploads were applied.
    pub fn tick(&mut self) -> usize {
        if let Some(stream) = self.stream.as_mut() {
            stream.advance();
        }
        let events = self.uploader.drain_ready();
        let n = events.len();
        for ev in events {
            self.apply_upload(ev);
        }
        n
    }

    /// Block until every pending upload has been decoded and applied.
    pub fn wait_for_uploads(&mut self) -> usize {
        let events = self.uploader.wait_all();
        let n = events.len();
        for ev in events {
            self.apply_upload(ev);
        }
        n
    }

    pub fn pending_uploads(&self) -> usize {
        self.uploader.in_flight()
    }

    fn apply_upload(&mut self, ev: UploadEvent) {
        let newest = match ev.target {
            UploadTarget::Background => self.background_upload,
            UploadTarget::Frame => self.frame_upload,
            UploadTarget::Sticker(_) => Some(ev.seq),
        };
        if newest != Some(ev.seq) {
            tracing::debug!(slot = ?ev.target, seq = ev.seq, "dropping superseded upload");
            return;
        }
        match (ev.target, ev.result) {
            (UploadTarget::Background, Ok(img)) => self.background = Some(img),
            (UploadTarget::Frame, Ok(img)) => self.frame = Some(img),
            (UploadTarget::Sticker(id), Ok(img)) => match self.sticker_mut(id) {
                Some(s) => s.image = Some(img),
                None => tracing::debug!(id = id.0, "sticker removed before its image decoded"),
            },
            (UploadTarget::Sticker(id), Err(err)) => {
                tracing::warn!(id = id.0, %err, "sticker upload failed; removing sticker");
                self.remove_sticker(id);
            }
            (target, Err(err)) => {
                tracing::warn!(?target, %err, "image upload failed");
                self.error_message = Some(format!("Could not load image: {err}"));
            }
        }
    }

    pub fn visual_source(&self) -> VisualSource<'_> {
        resolve_source(self.stream.as_deref(), self.background.as_ref())
    }

    pub fn render_inputs(&self) -> RenderInputs<'_> {
        RenderInputs {
            source: self.visual_source(),
            filter: self.filter,
            stickers: &self.stickers,
            frame: self.frame.as_ref(),
        }
    }

    pub fn render(&self) -> BoothResult<FrameRGBA> {
        render_composite(self.canvas, &self.render_inputs())
    }

    /// Render once and store the result in the album.
    pub fn capture(&mut self) -> BoothResult<PhotoId> {
        let frame = self.render()?;
        let id = self.album.push_frame(&frame)?;
        tracing::info!(photo = id.0, photos = self.album.len(), "photo captured");
        Ok(id)
    }

    pub fn album(&self) -> &PhotoAlbum {
        &self.album
    }

    pub fn album_mut(&mut self) -> &mut PhotoAlbum {
        &mut self.album
    }
}

impl Drop for BoothSession {
    fn drop(&mut self) {
        self.release_camera();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
