use super::*;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let rgba = [10u8, 20, 30, 255].repeat((width * height) as usize);
    let mut out = Vec::new();
    image::write_buffer_with_format(
        &mut std::io::Cursor::new(&mut out),
        &rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .unwrap();
    out
}

#[test]
fn wait_all_collects_every_submission() {
    let mut up = Uploader::new();
    up.submit_bytes(UploadTarget::Background, png_bytes(4, 3));
    up.submit_bytes(UploadTarget::Frame, png_bytes(2, 2));
    assert_eq!(up.in_flight(), 2);

    let mut events = up.wait_all();
    assert_eq!(up.in_flight(), 0);
    events.sort_by_key(|e| e.target == UploadTarget::Frame);

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].target, UploadTarget::Background);
    let bg = events[0].result.as_ref().unwrap();
    assert_eq!((bg.width, bg.height), (4, 3));
    assert_eq!(events[1].target, UploadTarget::Frame);
}

#[test]
fn decode_failures_are_reported_not_dropped() {
    let mut up = Uploader::new();
    up.submit_bytes(UploadTarget::Sticker(StickerId(7)), b"nope".to_vec());
    let events = up.wait_all();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target, UploadTarget::Sticker(StickerId(7)));
    assert!(events[0].result.is_err());
}

#[test]
fn missing_file_is_an_error_event() {
    let mut up = Uploader::new();
    up.submit_path(UploadTarget::Frame, "target/does/not/exist.png");
    let events = up.wait_all();
    let err = events[0].result.as_ref().unwrap_err();
    assert!(err.to_string().contains("read upload"));
}

#[test]
fn drain_ready_on_idle_uploader_is_empty() {
    let mut up = Uploader::new();
    assert!(up.drain_ready().is_empty());
    assert_eq!(up.in_flight(), 0);
}

#[test]
fn submissions_are_numbered_in_order() {
    let mut up = Uploader::new();
    let a = up.submit_bytes(UploadTarget::Background, png_bytes(1, 1));
    let b = up.submit_path(UploadTarget::Frame, "target/does/not/exist.png");
    let c = up.submit_bytes(UploadTarget::Background, png_bytes(2, 1));
    assert!(a < b && b < c);

    let mut seqs: Vec<u64> = up.wait_all().iter().map(|e| e.seq).collect();
    seqs.sort_unstable();
    assert_eq!(seqs, vec![a, b, c]);
}
