use super::*;

fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    image::write_buffer_with_format(
        &mut std::io::Cursor::new(&mut out),
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .unwrap();
    out
}

#[test]
fn decode_png_premultiplies_pixels() {
    let bytes = encode_png(2, 1, &[255, 0, 0, 255, 255, 255, 255, 128]);
    let img = decode_image(&bytes).unwrap();
    assert_eq!((img.width, img.height), (2, 1));
    assert_eq!(img.rgba8_premul.as_slice(), &[255, 0, 0, 255, 128, 128, 128, 128]);
}

#[test]
fn decode_rejects_garbage() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, BoothError::Other(_)));
}

#[test]
fn premultiply_zeroes_color_of_transparent_pixels() {
    let mut px = vec![200, 100, 50, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0]);
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let mut px = vec![128, 64, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![255, 128, 0, 128]);
}

#[test]
fn from_straight_rejects_size_mismatch() {
    assert!(PreparedImage::from_straight_rgba8(2, 2, vec![0; 4]).is_err());
    assert!(PreparedImage::from_straight_rgba8(0, 2, vec![]).is_err());
}

#[test]
fn solid_image_has_expected_aspect() {
    let img = PreparedImage::solid(50, 25, [1, 2, 3, 255]).unwrap();
    assert_eq!(img.rgba8_premul.len(), 50 * 25 * 4);
    assert!((img.aspect() - 2.0).abs() < 1e-12);
}

#[test]
fn oversized_images_are_rejected_as_decode_errors() {
    let err = PreparedImage::solid(MAX_IMAGE_DIM + 1, 1, [0, 0, 0, 255]).unwrap_err();
    assert!(matches!(err, BoothError::Decode(_)), "{err}");

    let wide = vec![0u8; (MAX_IMAGE_DIM as usize + 1) * 4];
    let err = decode_image(&encode_png(MAX_IMAGE_DIM + 1, 1, &wide)).unwrap_err();
    assert!(matches!(err, BoothError::Decode(_)), "{err}");

    assert!(PreparedImage::solid(MAX_IMAGE_DIM, 1, [0, 0, 0, 255]).is_ok());
}
