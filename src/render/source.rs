use crate::assets::decode::PreparedImage;
use crate::camera::stream::LiveStream;

/// The single base layer for one draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VisualSource<'a> {
    /// A ready camera frame.
    LiveVideo(&'a PreparedImage),
    /// The user's background image.
    StaticImage(&'a PreparedImage),
    /// Neither is available; draw the placeholder message.
    Unavailable,
}

impl VisualSource<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LiveVideo(_) => "live_video",
            Self::StaticImage(_) => "static_image",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Pick the base layer: a ready live frame, else the background, else the placeholder.
///
/// An attached stream that has not buffered a frame yet does not count as live.
pub fn resolve_source<'a>(
    stream: Option<&'a dyn LiveStream>,
    background: Option<&'a PreparedImage>,
) -> VisualSource<'a> {
    if let Some(frame) = stream.and_then(|s| s.current_frame()) {
        return VisualSource::LiveVideo(frame);
    }
    match background {
        Some(img) => VisualSource::StaticImage(img),
        None => VisualSource::Unavailable,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/source.rs"]
mod tests;
