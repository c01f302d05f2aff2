use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_config").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &Path, w: u32, h: u32, rgba: [u8; 4]) {
    image::RgbaImage::from_pixel(w, h, image::Rgba(rgba))
        .save(path)
        .unwrap();
}

#[test]
fn minimal_document_uses_defaults() {
    let cfg = BoothConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, BoothConfig::default());
    assert_eq!(cfg.canvas, Canvas::BOOTH);
    assert_eq!(cfg.filter_key(), FilterKey::None);
    assert_eq!(cfg.camera, CameraConfig::None);
    cfg.validate().unwrap();
}

#[test]
fn full_document_parses() {
    let cfg = BoothConfig::from_json_str(
        r#"{
            "canvas": {"width": 320, "height": 240},
            "filter": "Sepia",
            "camera": {"kind": "file", "frames": ["a.png", "b.png"], "warmup_ticks": 1},
            "permission": "prompt",
            "background": "bg.png",
            "frame": "frame.png",
            "stickers": [{"source": "s.png", "x": 10, "y": 20}, {"source": "t.png", "x": 1, "y": 2, "scale": 0.5}]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.canvas, Canvas::new(320, 240).unwrap());
    assert_eq!(cfg.filter_key(), FilterKey::Sepia);
    assert_eq!(cfg.permission, Some(PermissionState::Prompt));
    assert_eq!(
        cfg.camera,
        CameraConfig::File {
            frames: vec![PathBuf::from("a.png"), PathBuf::from("b.png")],
            warmup_ticks: 1,
        }
    );
    assert_eq!(cfg.stickers[0].scale, 1.0);
    assert_eq!(cfg.stickers[1].scale, 0.5);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = BoothConfig::from_json_str(r#"{"filtr": "blur"}"#).unwrap_err();
    assert!(matches!(err, BoothError::Serde(_)));
    assert!(err.to_string().starts_with("serialization error:"));
}

#[test]
fn validate_catches_bad_values() {
    let mut cfg = BoothConfig::default();
    cfg.stickers.push(StickerConfig {
        source: "s.png".into(),
        x: 0.0,
        y: 0.0,
        scale: -1.0,
    });
    assert!(matches!(cfg.validate(), Err(BoothError::Validation(_))));

    let cfg = BoothConfig {
        canvas: Canvas {
            width: 0,
            height: 10,
        },
        ..BoothConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = BoothConfig {
        camera: CameraConfig::File {
            frames: vec![],
            warmup_ticks: 0,
        },
        ..BoothConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn denied_camera_config_falls_back_to_background() {
    let dir = scratch_dir("denied");
    write_png(&dir.join("bg.png"), 16, 9, [10, 200, 10, 255]);
    let cfg = BoothConfig {
        canvas: Canvas::new(32, 24).unwrap(),
        camera: CameraConfig::Denied,
        background: Some("bg.png".into()),
        ..BoothConfig::default()
    };
    let session = cfg.build_session(&dir).unwrap();
    assert_eq!(session.permission(), PermissionState::Denied);
    assert_eq!(session.visual_source().kind(), "static_image");
}

#[test]
fn file_camera_config_attaches_stream() {
    let dir = scratch_dir("file_camera");
    write_png(&dir.join("f0.png"), 8, 8, [255, 0, 0, 255]);
    let cfg = BoothConfig::from_json_str(
        r#"{"camera": {"kind": "file", "frames": ["f0.png"]}, "filter": "invert"}"#,
    )
    .unwrap();
    let session = cfg.build_session(&dir).unwrap();
    assert_eq!(session.permission(), PermissionState::Granted);
    assert!(session.has_live_video());
    assert_eq!(session.filter(), FilterKey::Invert);
}

#[test]
fn stickers_are_loaded_in_order() {
    let dir = scratch_dir("stickers");
    write_png(&dir.join("s.png"), 4, 4, [0, 0, 255, 255]);
    let cfg = BoothConfig::from_json_str(
        r#"{"stickers": [{"source": "s.png", "x": 5, "y": 5}, {"source": "s.png", "x": 9, "y": 9, "scale": 2}]}"#,
    )
    .unwrap();
    let session = cfg.build_session(&dir).unwrap();
    let stickers = session.stickers();
    assert_eq!(stickers.len(), 2);
    assert!(stickers.iter().all(|s| s.is_ready()));
    assert_eq!(stickers[1].center, Point::new(9.0, 9.0));
    assert_eq!(stickers[1].scale, 2.0);
}

#[test]
fn missing_asset_fails_the_build() {
    let dir = scratch_dir("missing");
    let cfg = BoothConfig {
        frame: Some("nope.png".into()),
        ..BoothConfig::default()
    };
    let err = cfg.build_session(&dir).unwrap_err();
    assert!(err.to_string().contains("nope.png"));
}

#[test]
fn config_round_trips_through_json() {
    let cfg = BoothConfig {
        filter: "blur".into(),
        camera: CameraConfig::Unsupported,
        ..BoothConfig::default()
    };
    let json = cfg.to_json_pretty().unwrap();
    assert!(json.contains(r#""kind": "unsupported""#));
    assert_eq!(BoothConfig::from_json_str(&json).unwrap(), cfg);
}
