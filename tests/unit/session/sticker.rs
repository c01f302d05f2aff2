use super::*;

fn square(side: u32) -> PreparedImage {
    PreparedImage::solid(side, side, [0, 0, 255, 255]).unwrap()
}

#[test]
fn pending_sticker_has_no_bounds() {
    let s = Sticker::new(StickerId(1), Point::new(10.0, 10.0), 1.0).unwrap();
    assert!(!s.is_ready());
    assert_eq!(s.bounds(), None);
    assert!(!s.contains(Point::new(10.0, 10.0)));
}

#[test]
fn bounds_follow_scale_and_center() {
    let mut s = Sticker::new(StickerId(1), Point::new(100.0, 100.0), 1.0)
        .unwrap()
        .with_image(square(50));
    assert_eq!(s.bounds(), Some(Rect::new(75.0, 75.0, 125.0, 125.0)));

    s.set_scale(2.0).unwrap();
    s.move_to(Point::new(0.0, 0.0)).unwrap();
    assert_eq!(s.bounds(), Some(Rect::new(-50.0, -50.0, 50.0, 50.0)));
    assert!(s.contains(Point::new(49.0, -49.0)));
    assert!(!s.contains(Point::new(51.0, 0.0)));
}

#[test]
fn invalid_scale_and_position_are_rejected() {
    assert!(Sticker::new(StickerId(1), Point::ZERO, 0.0).is_err());
    assert!(Sticker::new(StickerId(1), Point::ZERO, -1.0).is_err());
    assert!(Sticker::new(StickerId(1), Point::ZERO, f64::NAN).is_err());
    assert!(Sticker::new(StickerId(1), Point::new(f64::INFINITY, 0.0), 1.0).is_err());

    let mut s = Sticker::new(StickerId(1), Point::ZERO, 1.0).unwrap();
    assert!(s.set_scale(f64::INFINITY).is_err());
    assert_eq!(s.scale, 1.0);
}
