use super::*;

#[test]
fn unknown_keys_fall_back_to_identity() {
    for key in ["", "vintage", "GRAYSCALE!", "blur(3px)", "sepia 80%"] {
        let parsed = FilterKey::parse(key);
        assert_eq!(parsed, FilterKey::None, "key {key:?}");
        assert_eq!(parsed.transform(), FilterTransform::Identity);
    }
}

#[test]
fn parse_is_case_insensitive_and_trims() {
    assert_eq!(FilterKey::parse(" Sepia "), FilterKey::Sepia);
    assert_eq!(FilterKey::parse("INVERT"), FilterKey::Invert);
}

#[test]
fn every_key_round_trips_through_as_str() {
    for key in FilterKey::ALL {
        assert_eq!(FilterKey::parse(key.as_str()), key);
    }
}

#[test]
fn blur_is_three_px_gaussian() {
    assert_eq!(
        FilterKey::Blur.transform(),
        FilterTransform::Blur {
            radius_px: 9,
            sigma: 3.0
        }
    );
}

#[test]
fn color_keys_map_to_matrices() {
    assert!(matches!(
        FilterKey::Grayscale.transform(),
        FilterTransform::ColorMatrix(_)
    ));
    assert!(matches!(
        FilterKey::Sepia.transform(),
        FilterTransform::ColorMatrix(_)
    ));
    assert!(matches!(
        FilterKey::Invert.transform(),
        FilterTransform::ColorMatrix(_)
    ));
    assert!(FilterKey::None.transform().is_identity());
}

#[test]
fn zero_sigma_blur_is_identity() {
    assert!(FilterTransform::blur_px(0.0).is_identity());
}
