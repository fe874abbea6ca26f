use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::{
    encode::ffmpeg::{EncodeConfig, FfmpegEncoder},
    foundation::{
        config::ImageMode,
        error::{StagehandError, StagehandResult},
    },
    scene::params::SceneParams,
};

/// Frame sink for scenes built from numbered animations.
///
/// Each [`Recorder::play`] call is one animation. Frames of animations inside the
/// requested window are written to the PNG sequence and/or the movie; the final frame
/// of everything played is kept for [`Recorder::save_image`].
pub struct Recorder {
    name: String,
    params: SceneParams,
    animation: u32,
    frames_written: u64,
    last_frame: Option<RgbaImage>,
    encoder: Option<FfmpegEncoder>,
}

impl Recorder {
    pub fn new(params: &SceneParams, type_name: &str) -> Self {
        Self {
            name: params.output_name(type_name).to_string(),
            params: params.clone(),
            animation: 0,
            frames_written: 0,
            last_frame: None,
            encoder: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn animations_played(&self) -> u32 {
        self.animation
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn width(&self) -> u32 {
        self.params.camera_config.pixel_width
    }

    pub fn height(&self) -> u32 {
        self.params.camera_config.pixel_height
    }

    /// A frame filled with the camera background.
    pub fn blank(&self) -> RgbaImage {
        RgbaImage::from_pixel(
            self.width(),
            self.height(),
            Rgba(self.params.camera_config.background),
        )
    }

    /// Number of frames an animation of `run_time` seconds spans; at least one.
    pub fn frames_for(&self, run_time: f64) -> u64 {
        ((run_time / self.params.frame_duration).ceil() as u64).max(1)
    }

    /// Play one animation. `draw` paints a frame for progress `t` in `(0, 1]`.
    pub fn play(
        &mut self,
        run_time: f64,
        mut draw: impl FnMut(&mut RgbaImage, f64),
    ) -> StagehandResult<()> {
        let n = self.animation;
        self.animation += 1;

        if self.params.end_at_animation_number.is_some_and(|end| n >= end) {
            return Ok(());
        }

        let emit = !self.params.skip_animations && self.params.animation_in_range(n);
        let total = if emit { self.frames_for(run_time) } else { 1 };
        for i in 0..total {
            let t = (i + 1) as f64 / total as f64;
            let mut frame = self.blank();
            draw(&mut frame, t);
            if emit {
                self.emit(&frame)?;
            }
            self.last_frame = Some(frame);
        }
        Ok(())
    }

    fn emit(&mut self, frame: &RgbaImage) -> StagehandResult<()> {
        if let Some(mode) = self.params.pngs_mode.filter(|_| self.params.save_pngs) {
            save_png(frame, mode, &self.png_sequence_path(self.frames_written))?;
        }
        if self.params.write_to_movie {
            if self.encoder.is_none() {
                self.encoder = Some(self.start_encoder()?);
            }
            if let Some(encoder) = self.encoder.as_mut() {
                encoder.encode_frame(frame)?;
            }
        }
        self.frames_written += 1;
        Ok(())
    }

    fn start_encoder(&self) -> StagehandResult<FfmpegEncoder> {
        FfmpegEncoder::spawn(EncodeConfig::for_scene(&self.params, self.movie_file_path()))
    }

    /// Close the movie, if one was started.
    pub fn finish(&mut self) -> StagehandResult<()> {
        if let Some(encoder) = self.encoder.take() {
            let out = encoder.out_path().to_path_buf();
            let frames = encoder.finish()?;
            tracing::info!(scene = %self.name, out = %out.display(), frames, "movie written");
        }
        Ok(())
    }

    /// Write the last frame (or a blank one if nothing was played).
    pub fn save_image(&self, mode: ImageMode) -> StagehandResult<()> {
        let path = self.image_file_path();
        match &self.last_frame {
            Some(frame) => save_png(frame, mode, &path),
            None => save_png(&self.blank(), mode, &path),
        }
    }

    pub fn image_file_path(&self) -> PathBuf {
        self.params
            .media_dir()
            .join("images")
            .join(format!("{}.png", self.name))
    }

    pub fn movie_file_path(&self) -> PathBuf {
        self.params.media_dir().join("videos").join(format!(
            "{}{}",
            self.name, self.params.movie_file_extension
        ))
    }

    pub fn png_sequence_path(&self, index: u64) -> PathBuf {
        self.params
            .media_dir()
            .join("images")
            .join(&self.name)
            .join(format!("{}_{index:05}.png", self.name))
    }
}

pub fn save_png(frame: &RgbaImage, mode: ImageMode, path: &Path) -> StagehandResult<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create image directory '{}'", dir.display()))?;
    }
    let written = match mode {
        ImageMode::Rgba => frame.save_with_format(path, ImageFormat::Png),
        ImageMode::Rgb => DynamicImage::ImageRgba8(frame.clone())
            .to_rgb8()
            .save_with_format(path, ImageFormat::Png),
    };
    written
        .with_context(|| format!("write png '{}'", path.display()))
        .map_err(|e| StagehandError::render(format!("{e:#}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/recorder.rs"]
mod tests;
