use std::process::Command;

use super::*;
use crate::foundation::config::{CameraConfig, Config};

fn cfg(width: u32, height: u32, fps: u32) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: PathBuf::from("target/encode/out.mp4"),
        background: [0, 0, 0],
    }
}

fn ffmpeg_available() -> bool {
    Command::new(FFMPEG)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

fn one_pixel(px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(1, 1, Rgba(px))
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(cfg(0, 10, 30).validate().is_err());
    assert!(cfg(11, 10, 30).validate().is_err());
    assert!(cfg(10, 7, 30).validate().is_err());
    assert!(cfg(10, 10, 0).validate().is_err());
    cfg(854, 480, 60).validate().unwrap();
}

#[test]
fn scene_settings_pick_size_rate_and_background() {
    let config = Config {
        camera_config: CameraConfig {
            pixel_width: 64,
            pixel_height: 36,
            background: [1, 2, 3, 0],
        },
        frame_duration: 1.0 / 29.97,
        ..Config::default()
    };
    let params = SceneParams::from_config(&config);
    let enc = EncodeConfig::for_scene(&params, PathBuf::from("m/Sweep.mp4"));
    assert_eq!((enc.width, enc.height, enc.fps), (64, 36, 30));
    assert_eq!(enc.background, [1, 2, 3]);
    assert_eq!(enc.frame_len(), 64 * 36 * 4);

    let slow = SceneParams {
        frame_duration: 4.0,
        ..params
    };
    assert_eq!(EncodeConfig::for_scene(&slow, PathBuf::new()).fps, 1);
}

#[test]
fn command_line_always_replaces_and_ends_with_the_movie() {
    let args = cfg(8, 6, 15).ffmpeg_args();
    let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(args[0], "-y");
    assert!(!args.iter().any(|a| a == "-n"));
    let after = |flag: &str| {
        let i = args.iter().position(|a| a == flag).unwrap();
        args[i + 1].clone()
    };
    assert_eq!(after("-video_size"), "8x6");
    assert_eq!(after("-framerate"), "15");
    assert_eq!(after("-i"), "pipe:0");
    assert_eq!(args.last().unwrap(), "target/encode/out.mp4");
}

#[test]
fn flatten_straight_over_black_produces_expected_rgb() {
    let mut out = Vec::new();
    flatten_onto(&mut out, &one_pixel([255, 0, 0, 128]), [0, 0, 0]);
    assert_eq!(out, [128u8, 0, 0, 255]);
}

#[test]
fn flatten_transparent_shows_background_and_reuses_the_buffer() {
    let mut out = vec![9u8; 12];
    flatten_onto(&mut out, &one_pixel([200, 10, 10, 0]), [10, 20, 30]);
    assert_eq!(out, [10u8, 20, 30, 255]);

    flatten_onto(&mut out, &one_pixel([7, 8, 9, 255]), [10, 20, 30]);
    assert_eq!(out, [7u8, 8, 9, 255]);
}

#[test]
fn invalid_size_fails_before_starting_ffmpeg() {
    let err = FfmpegEncoder::spawn(cfg(9, 6, 30)).err().unwrap();
    assert!(err.to_string().contains("9x6"));
}

#[test]
fn finish_reports_the_frames_written() {
    if !ffmpeg_available() {
        return;
    }
    let mut c = cfg(4, 4, 10);
    c.out_path = PathBuf::from("target/encode/finished.mp4");
    let _ = fs::remove_file(&c.out_path);

    let mut enc = FfmpegEncoder::spawn(c.clone()).unwrap();
    let frame = RgbaImage::from_pixel(4, 4, Rgba([0, 128, 255, 255]));
    enc.encode_frame(&frame).unwrap();
    enc.encode_frame(&frame).unwrap();
    assert!(enc.encode_frame(&one_pixel([0, 0, 0, 255])).is_err());
    assert_eq!(enc.frames(), 2);

    assert_eq!(enc.finish().unwrap(), 2);
    assert!(c.out_path.is_file());
}

#[test]
fn dropping_an_unfinished_encoder_waits_for_ffmpeg() {
    if !ffmpeg_available() {
        return;
    }
    let mut c = cfg(4, 4, 10);
    c.out_path = PathBuf::from("target/encode/abandoned.mp4");
    let _ = fs::remove_file(&c.out_path);

    let mut enc = FfmpegEncoder::spawn(c.clone()).unwrap();
    enc.encode_frame(&RgbaImage::new(4, 4)).unwrap();
    drop(enc);

    // ffmpeg has exited and flushed its output by the time drop returns.
    let len = fs::metadata(&c.out_path).map(|m| m.len()).unwrap_or(0);
    assert!(len > 0);
}
