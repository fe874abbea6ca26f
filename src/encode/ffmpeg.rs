//! Movie output through the system `ffmpeg` binary.
//!
//! A scene's frames are piped in as raw RGBA and come out as H.264. Each render
//! replaces the previous movie of the same scene.

use std::{
    ffi::OsString,
    fs,
    io::{self, Read as _, Write as _},
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, ExitStatus, Stdio},
};

use anyhow::Context as _;
use image::{Rgba, RgbaImage};

use crate::{
    foundation::error::{StagehandError, StagehandResult},
    scene::params::SceneParams,
};

const FFMPEG: &str = "ffmpeg";

/// Shape of the movie one scene writes.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    /// Opaque color transparent pixels are flattened onto.
    pub background: [u8; 3],
}

impl EncodeConfig {
    /// Camera size and background of `params`; the frame rate is the nearest whole
    /// number of frames per second, at least one.
    pub fn for_scene(params: &SceneParams, out_path: PathBuf) -> Self {
        let camera = &params.camera_config;
        let [r, g, b, _] = camera.background;
        Self {
            width: camera.pixel_width,
            height: camera.pixel_height,
            fps: (1.0 / params.frame_duration).round().max(1.0) as u32,
            out_path,
            background: [r, g, b],
        }
    }

    pub fn validate(&self) -> StagehandResult<()> {
        let (w, h) = (self.width, self.height);
        if w == 0 || h == 0 || self.fps == 0 {
            return Err(StagehandError::render(format!(
                "cannot encode {w}x{h} at {} fps",
                self.fps
            )));
        }
        // yuv420p subsamples chroma 2x2.
        if w % 2 == 1 || h % 2 == 1 {
            return Err(StagehandError::render(format!(
                "movie size {w}x{h} is odd; width and height must be even"
            )));
        }
        Ok(())
    }

    /// Bytes in one raw RGBA frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    pub fn ffmpeg_args(&self) -> Vec<OsString> {
        let input = [
            "-y".to_string(),
            "-loglevel".into(),
            "error".into(),
            "-f".into(),
            "rawvideo".into(),
            "-pix_fmt".into(),
            "rgba".into(),
            "-video_size".into(),
            format!("{}x{}", self.width, self.height),
            "-framerate".into(),
            self.fps.to_string(),
            "-i".into(),
            "pipe:0".into(),
        ];
        let output = ["-an", "-c:v", "libx264", "-pix_fmt", "yuv420p"];

        input
            .into_iter()
            .map(OsString::from)
            .chain(output.into_iter().map(OsString::from))
            .chain([self.out_path.clone().into_os_string()])
            .collect()
    }
}

/// A running `ffmpeg` that accepts frames until [`FfmpegEncoder::finish`].
///
/// Dropping an unfinished encoder closes its input and waits for the process, so an
/// aborted scene never leaves a child behind.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    buf: Vec<u8>,
    frames: u64,
    reaped: bool,
}

impl FfmpegEncoder {
    pub fn spawn(cfg: EncodeConfig) -> StagehandResult<Self> {
        cfg.validate()?;
        if let Some(dir) = cfg.out_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create movie directory '{}'", dir.display()))?;
        }

        let mut child = Command::new(FFMPEG)
            .args(cfg.ffmpeg_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => {
                    StagehandError::render("movie output needs `ffmpeg` on PATH")
                }
                _ => StagehandError::render(format!("start ffmpeg: {e}")),
            })?;
        let stdin = child.stdin.take();
        tracing::debug!(out = %cfg.out_path.display(), fps = cfg.fps, "encoding movie");

        Ok(Self {
            buf: Vec::with_capacity(cfg.frame_len()),
            cfg,
            child,
            stdin,
            frames: 0,
            reaped: false,
        })
    }

    pub fn out_path(&self) -> &Path {
        &self.cfg.out_path
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn encode_frame(&mut self, frame: &RgbaImage) -> StagehandResult<()> {
        let expected = (self.cfg.width, self.cfg.height);
        if frame.dimensions() != expected {
            let (w, h) = frame.dimensions();
            return Err(StagehandError::render(format!(
                "frame is {w}x{h}, movie is {}x{}",
                expected.0, expected.1
            )));
        }
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(StagehandError::render("ffmpeg input is already closed"));
        };

        flatten_onto(&mut self.buf, frame, self.cfg.background);
        stdin
            .write_all(&self.buf)
            .with_context(|| format!("pipe frame {} to ffmpeg", self.frames))?;
        self.frames += 1;
        Ok(())
    }

    /// Close the input and wait for the movie to be written. Returns the frame count.
    pub fn finish(mut self) -> StagehandResult<u64> {
        let (status, log) = self.reap().context("wait for ffmpeg")?;
        if !status.success() {
            return Err(StagehandError::render(format!(
                "ffmpeg failed on '{}' ({status}): {}",
                self.cfg.out_path.display(),
                log.trim()
            )));
        }
        Ok(self.frames)
    }

    fn reap(&mut self) -> io::Result<(ExitStatus, String)> {
        drop(self.stdin.take());
        let mut log = Vec::new();
        if let Some(mut stderr) = self.child.stderr.take() {
            stderr.read_to_end(&mut log)?;
        }
        let status = self.child.wait()?;
        self.reaped = true;
        Ok((status, String::from_utf8_lossy(&log).into_owned()))
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }
        let out = self.cfg.out_path.display().to_string();
        match self.reap() {
            Ok((status, _)) => {
                tracing::warn!(%out, %status, frames = self.frames, "movie abandoned");
            }
            Err(e) => tracing::warn!(%out, "could not reap ffmpeg: {e}"),
        }
    }
}

/// Replace `out` with `frame` composited over an opaque `background`. Alpha is
/// straight, as `image` stores it.
pub fn flatten_onto(out: &mut Vec<u8>, frame: &RgbaImage, background: [u8; 3]) {
    let [br, bg, bb] = background;
    out.clear();
    for &Rgba([r, g, b, a]) in frame.pixels() {
        out.extend_from_slice(&[over(r, br, a), over(g, bg, a), over(b, bb, a), 255]);
    }
}

fn over(c: u8, bg: u8, a: u8) -> u8 {
    let (c, bg, a) = (u32::from(c), u32::from(bg), u32::from(a));
    ((c * a + bg * (255 - a) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
