use super::*;
use crate::camera::stream::{CameraProvider, FileCamera};

fn img(rgba: [u8; 4]) -> PreparedImage {
    PreparedImage::solid(4, 3, rgba).unwrap()
}

#[test]
fn nothing_available_resolves_to_placeholder() {
    assert_eq!(resolve_source(None, None), VisualSource::Unavailable);
}

#[test]
fn background_used_without_stream() {
    let bg = img([0, 255, 0, 255]);
    assert_eq!(resolve_source(None, Some(&bg)), VisualSource::StaticImage(&bg));
}

#[test]
fn ready_stream_wins_over_background() {
    let frame = img([255, 0, 0, 255]);
    let bg = img([0, 255, 0, 255]);
    let mut cam = FileCamera::new("cam", vec![frame.clone()], 0);
    let stream = cam.request_camera().unwrap();

    let src = resolve_source(Some(stream.as_ref()), Some(&bg));
    assert_eq!(src, VisualSource::LiveVideo(&frame));
    assert_eq!(src.kind(), "live_video");
}

#[test]
fn stream_that_is_not_ready_falls_through() {
    let bg = img([0, 255, 0, 255]);
    let mut cam = FileCamera::new("cam", vec![img([255, 0, 0, 255])], 3);
    let stream = cam.request_camera().unwrap();

    assert_eq!(
        resolve_source(Some(stream.as_ref()), Some(&bg)),
        VisualSource::StaticImage(&bg)
    );
    assert_eq!(
        resolve_source(Some(stream.as_ref()), None),
        VisualSource::Unavailable
    );
}
