use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{StagehandError, StagehandResult};

/// Pixel layout used when persisting still images and PNG sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMode {
    /// Opaque 8-bit RGB.
    #[default]
    #[serde(rename = "RGB")]
    Rgb,
    /// 8-bit RGB with straight alpha.
    #[serde(rename = "RGBA")]
    Rgba,
}

/// Camera settings forwarded verbatim to every scene.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Straight RGBA background color.
    #[serde(default = "CameraConfig::default_background")]
    pub background: [u8; 4],
}

impl CameraConfig {
    fn default_background() -> [u8; 4] {
        [0, 0, 0, 255]
    }

    pub fn production() -> Self {
        Self {
            pixel_width: 1920,
            pixel_height: 1080,
            background: Self::default_background(),
        }
    }

    pub fn medium() -> Self {
        Self {
            pixel_width: 1280,
            pixel_height: 720,
            background: Self::default_background(),
        }
    }

    pub fn low() -> Self {
        Self {
            pixel_width: 854,
            pixel_height: 480,
            background: Self::default_background(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::production()
    }
}

/// Validated, read-only run configuration.
///
/// Built once per invocation (from CLI flags, optionally layered over a JSON file) and
/// only ever borrowed immutably afterwards. Unknown keys in a JSON config are rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Source module path, e.g. `demos/shapes.rs`.
    pub file: PathBuf,
    /// Explicit scene filter; empty means unset.
    pub scene_name: String,
    pub write_all: bool,
    pub quiet: bool,
    pub show_last_frame: bool,
    pub open_video_upon_completion: bool,
    pub show_file_in_finder: bool,
    pub saved_image_mode: ImageMode,

    pub camera_config: CameraConfig,
    /// Seconds per frame.
    pub frame_duration: f64,
    pub skip_animations: bool,
    pub write_to_movie: bool,
    pub save_pngs: bool,
    pub movie_file_extension: String,
    pub start_at_animation_number: Option<u32>,
    pub end_at_animation_number: Option<u32>,
    pub output_name: Option<String>,

    /// Root directory for rendered images and movies.
    pub media_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::new(),
            scene_name: String::new(),
            write_all: false,
            quiet: false,
            show_last_frame: false,
            open_video_upon_completion: false,
            show_file_in_finder: false,
            saved_image_mode: ImageMode::Rgb,
            camera_config: CameraConfig::default(),
            frame_duration: 1.0 / 60.0,
            skip_animations: false,
            write_to_movie: false,
            save_pngs: false,
            movie_file_extension: ".mp4".to_string(),
            start_at_animation_number: None,
            end_at_animation_number: None,
            output_name: None,
            media_dir: PathBuf::from("media"),
        }
    }
}

impl Config {
    /// Load a JSON config file. Missing keys take their defaults.
    pub fn from_path(path: &Path) -> StagehandResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let r = BufReader::new(f);
        Self::from_reader(r).map_err(|e| match e {
            StagehandError::Config(msg) => {
                StagehandError::config(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn from_reader(r: impl std::io::Read) -> StagehandResult<Self> {
        serde_json::from_reader(r).map_err(|e| StagehandError::config(e.to_string()))
    }

    /// Whether a finished scene should be handed to the host opener.
    pub fn wants_open(&self) -> bool {
        self.show_last_frame || self.open_video_upon_completion || self.show_file_in_finder
    }

    pub fn validate(&self) -> StagehandResult<()> {
        if self.file.as_os_str().is_empty() {
            return Err(StagehandError::config("no module file given"));
        }
        if !(self.frame_duration.is_finite() && self.frame_duration > 0.0) {
            return Err(StagehandError::config(format!(
                "frame_duration must be positive, got {}",
                self.frame_duration
            )));
        }
        if self.camera_config.pixel_width == 0 || self.camera_config.pixel_height == 0 {
            return Err(StagehandError::config(
                "camera pixel width/height must be non-zero",
            ));
        }
        if let (Some(start), Some(end)) =
            (self.start_at_animation_number, self.end_at_animation_number)
            && end < start
        {
            return Err(StagehandError::config(format!(
                "end_at_animation_number ({end}) is before start_at_animation_number ({start})"
            )));
        }
        let ext = &self.movie_file_extension;
        if ext.len() < 2 || !ext.starts_with('.') {
            return Err(StagehandError::config(format!(
                "movie_file_extension must look like '.mp4', got '{ext}'"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
