use super::*;

fn frame(rgba: [u8; 4]) -> PreparedImage {
    PreparedImage::solid(4, 3, rgba).unwrap()
}

#[test]
fn stream_is_not_ready_during_warmup() {
    let mut cam = FileCamera::new("test", vec![frame([255, 0, 0, 255])], 2);
    let mut s = cam.request_camera().unwrap();
    assert!(s.current_frame().is_none());
    s.advance();
    assert!(s.current_frame().is_none());
    s.advance();
    assert!(s.current_frame().is_some());
}

#[test]
fn stream_cycles_frames_after_warmup() {
    let a = frame([255, 0, 0, 255]);
    let b = frame([0, 0, 255, 255]);
    let mut cam = FileCamera::new("test", vec![a.clone(), b.clone()], 0);
    let mut s = cam.request_camera().unwrap();
    assert_eq!(s.current_frame(), Some(&a));
    s.advance();
    assert_eq!(s.current_frame(), Some(&b));
    s.advance();
    assert_eq!(s.current_frame(), Some(&a));
}

#[test]
fn stopped_stream_presents_nothing() {
    let mut cam = FileCamera::new("test", vec![frame([1, 2, 3, 255])], 0);
    let mut s = cam.request_camera().unwrap();
    s.stop();
    s.stop();
    assert!(s.is_stopped());
    assert!(s.current_frame().is_none());
}

#[test]
fn empty_file_camera_reports_no_device() {
    let mut cam = FileCamera::new("empty", Vec::new(), 0);
    assert_eq!(cam.request_camera().err(), Some(CameraError::NoDevice));
}

#[test]
fn unavailable_camera_returns_its_error() {
    let mut cam = UnavailableCamera(CameraError::PermissionDenied);
    assert_eq!(cam.request_camera().err(), Some(CameraError::PermissionDenied));
}
