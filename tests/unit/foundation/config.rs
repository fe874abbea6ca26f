use super::*;

fn valid() -> Config {
    Config {
        file: PathBuf::from("demos/shapes.rs"),
        ..Config::default()
    }
}

#[test]
fn defaults_validate_once_a_file_is_set() {
    assert!(Config::default().validate().is_err());
    valid().validate().unwrap();
}

#[test]
fn json_fills_missing_keys_with_defaults() {
    let json = r#"{ "file": "demos/shapes.rs", "quiet": true, "saved_image_mode": "RGBA" }"#;
    let cfg = Config::from_reader(json.as_bytes()).unwrap();
    assert!(cfg.quiet);
    assert_eq!(cfg.saved_image_mode, ImageMode::Rgba);
    assert_eq!(cfg.movie_file_extension, ".mp4");
    assert_eq!(cfg.camera_config, CameraConfig::production());
}

#[test]
fn unknown_keys_are_rejected() {
    let json = r#"{ "file": "demos/shapes.rs", "fps_override": 12 }"#;
    let err = Config::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("config error:"));
    assert!(err.to_string().contains("fps_override"));
}

#[test]
fn wants_open_is_any_of_the_three_flags() {
    let mut cfg = valid();
    assert!(!cfg.wants_open());
    cfg.show_file_in_finder = true;
    assert!(cfg.wants_open());
    cfg = valid();
    cfg.open_video_upon_completion = true;
    assert!(cfg.wants_open());
    cfg = valid();
    cfg.show_last_frame = true;
    assert!(cfg.wants_open());
}

#[test]
fn validate_rejects_bad_values() {
    let mut cfg = valid();
    cfg.frame_duration = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = valid();
    cfg.camera_config.pixel_width = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = valid();
    cfg.start_at_animation_number = Some(3);
    cfg.end_at_animation_number = Some(1);
    assert!(cfg.validate().is_err());

    let mut cfg = valid();
    cfg.movie_file_extension = "mp4".to_string();
    assert!(cfg.validate().is_err());
}
