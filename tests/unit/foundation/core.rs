use super::*;

#[test]
fn booth_canvas_is_720_by_540() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (720, 540));
    assert!((c.aspect() - 4.0 / 3.0).abs() < 1e-12);
    assert_eq!(c.center(), Point::new(360.0, 270.0));
    assert_eq!(c.byte_len(), 720 * 540 * 4);
}

#[test]
fn canvas_rejects_zero_and_oversized_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    assert!(Canvas::new(64, 48).is_ok());
}

#[test]
fn premultiply_rounds_to_nearest() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
    assert_eq!(
        Rgba8Premul::from_straight_rgba(10, 20, 30, 0),
        Rgba8Premul::transparent()
    );
}

#[test]
fn hex_rgb_formats_lowercase() {
    assert_eq!(Rgba8Premul::opaque(0xf0, 0xf0, 0xf0).to_hex_rgb(), "#f0f0f0");
    assert_eq!(Rgba8Premul::opaque(0x66, 0x66, 0x66).to_hex_rgb(), "#666666");
}
