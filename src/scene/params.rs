use std::path::{Path, PathBuf};

use crate::foundation::config::{CameraConfig, Config, ImageMode};

/// Construction parameters handed to every scene in a batch.
///
/// Assembled from a fixed whitelist of [`Config`] fields; nothing else reaches a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub camera_config: CameraConfig,
    pub frame_duration: f64,
    pub skip_animations: bool,
    pub write_to_movie: bool,
    pub save_pngs: bool,
    pub movie_file_extension: String,
    pub start_at_animation_number: Option<u32>,
    pub end_at_animation_number: Option<u32>,
    /// Output name override; scenes fall back to their type name.
    pub name: Option<String>,
    /// Only set when `save_pngs` is on.
    pub pngs_mode: Option<ImageMode>,
    pub media_dir: PathBuf,
}

impl SceneParams {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            camera_config: cfg.camera_config.clone(),
            frame_duration: cfg.frame_duration,
            skip_animations: cfg.skip_animations,
            write_to_movie: cfg.write_to_movie,
            save_pngs: cfg.save_pngs,
            movie_file_extension: cfg.movie_file_extension.clone(),
            start_at_animation_number: cfg.start_at_animation_number,
            end_at_animation_number: cfg.end_at_animation_number,
            name: cfg.output_name.clone(),
            pngs_mode: cfg.save_pngs.then_some(cfg.saved_image_mode),
            media_dir: cfg.media_dir.clone(),
        }
    }

    /// Output name for a scene whose type is called `type_name`.
    pub fn output_name<'a>(&'a self, type_name: &'a str) -> &'a str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => type_name,
        }
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Whether animation number `n` falls inside the requested window.
    pub fn animation_in_range(&self, n: u32) -> bool {
        self.start_at_animation_number.is_none_or(|start| n >= start)
            && self.end_at_animation_number.is_none_or(|end| n < end)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/params.rs"]
mod tests;
