//! `demos/shapes.rs`: a handful of flat-color scenes built on [`Recorder`].

use std::{io::Write as _, path::PathBuf};

use image::{Rgba, RgbaImage};

use crate::{
    foundation::{config::ImageMode, console::Console},
    module::loader::SceneModule,
    render::recorder::Recorder,
    scene::{Binding, Scene, TypeDef, params::SceneParams},
};

pub const MODULE_NAME: &str = "demos::shapes";

const ACCENT: [u8; 4] = [88, 196, 221, 255];

pub fn module() -> anyhow::Result<SceneModule> {
    let base = TypeDef::derive("ShapeScene", TypeDef::scene_root(), None);
    Ok(SceneModule::new(MODULE_NAME)
        .bind("Scene", Binding::Type(TypeDef::scene_root().clone()))
        .bind("ACCENT", Binding::Value(serde_json::json!(ACCENT)))
        .bind("lerp_channel", Binding::Function("lerp_channel".to_string()))
        .bind("SolidFill", Binding::Type(TypeDef::scene("SolidFill", &base, solid_fill)))
        .bind("ColorSweep", Binding::Type(TypeDef::scene("ColorSweep", &base, color_sweep)))
        .bind(
            "Checkerboard",
            Binding::Type(TypeDef::scene("Checkerboard", &base, checkerboard)),
        ))
}

/// A finished shape scene: everything was rendered during construction.
struct ShapeScene {
    recorder: Recorder,
}

impl Scene for ShapeScene {
    fn save_image(&mut self, mode: ImageMode) -> anyhow::Result<()> {
        Ok(self.recorder.save_image(mode)?)
    }

    fn image_file_path(&self) -> PathBuf {
        self.recorder.image_file_path()
    }

    fn movie_file_path(&self) -> PathBuf {
        self.recorder.movie_file_path()
    }
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * t.clamp(0.0, 1.0)).round() as u8
}

fn lerp(from: [u8; 4], to: [u8; 4], t: f64) -> Rgba<u8> {
    Rgba(std::array::from_fn(|i| lerp_channel(from[i], to[i], t)))
}

fn run(
    type_name: &str,
    params: &SceneParams,
    console: &mut Console,
    animations: impl FnOnce(&mut Recorder) -> anyhow::Result<()>,
) -> anyhow::Result<Box<dyn Scene>> {
    let mut recorder = Recorder::new(params, type_name);
    writeln!(console.out(), "Rendering {}", recorder.name())?;
    animations(&mut recorder)?;
    recorder.finish()?;
    writeln!(
        console.out(),
        "Played {} animations, wrote {} frames",
        recorder.animations_played(),
        recorder.frames_written()
    )?;
    Ok(Box::new(ShapeScene { recorder }))
}

/// Fade the whole frame from the background to the accent color.
fn solid_fill(params: &SceneParams, console: &mut Console) -> anyhow::Result<Box<dyn Scene>> {
    let bg = params.camera_config.background;
    run("SolidFill", params, console, |rec| {
        rec.play(1.0, |frame, t| {
            let px = lerp(bg, ACCENT, t);
            frame.pixels_mut().for_each(|p| *p = px);
        })?;
        Ok(())
    })
}

/// A vertical bar crossing left to right, then right to left, then widening to full.
fn color_sweep(params: &SceneParams, console: &mut Console) -> anyhow::Result<Box<dyn Scene>> {
    run("ColorSweep", params, console, |rec| {
        let width = rec.width();
        let bar = (width / 8).max(1);
        rec.play(1.0, |frame, t| {
            let x0 = ((width - bar) as f64 * t) as u32;
            paint_columns(frame, x0, x0 + bar, ACCENT);
        })?;
        rec.play(1.0, |frame, t| {
            let x0 = ((width - bar) as f64 * (1.0 - t)) as u32;
            paint_columns(frame, x0, x0 + bar, ACCENT);
        })?;
        rec.play(0.5, |frame, t| {
            let half = (width as f64 * t / 2.0) as u32;
            let mid = width / 2;
            paint_columns(frame, mid.saturating_sub(half), mid + half, ACCENT);
        })?;
        Ok(())
    })
}

/// An 8x8 checkerboard that fades in, then inverts.
fn checkerboard(params: &SceneParams, console: &mut Console) -> anyhow::Result<Box<dyn Scene>> {
    let bg = params.camera_config.background;
    run("Checkerboard", params, console, |rec| {
        let cell = (rec.width().max(rec.height()) / 8).max(1);
        rec.play(1.0, |frame, t| {
            paint_checker(frame, cell, lerp(bg, ACCENT, t), Rgba(bg));
        })?;
        rec.play(1.0, |frame, t| {
            paint_checker(frame, cell, lerp(ACCENT, bg, t), lerp(bg, ACCENT, t));
        })?;
        Ok(())
    })
}

fn paint_columns(frame: &mut RgbaImage, x0: u32, x1: u32, color: [u8; 4]) {
    for (x, _, p) in frame.enumerate_pixels_mut() {
        if (x0..x1).contains(&x) {
            *p = Rgba(color);
        }
    }
}

fn paint_checker(frame: &mut RgbaImage, cell: u32, on: Rgba<u8>, off: Rgba<u8>) {
    for (x, y, p) in frame.enumerate_pixels_mut() {
        *p = if (x / cell + y / cell) % 2 == 0 { on } else { off };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/demos/shapes.rs"]
mod tests;
