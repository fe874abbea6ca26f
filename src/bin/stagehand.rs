use std::{
    io::{self, Write as _},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stagehand::{
    BellCues, CameraConfig, Config, Console, DetachedLauncher, Dispatcher, INVALID_NUMBER_MESSAGE,
    ImageMode, ModuleRegistry, Orchestrator, PromptChooser, RunCues, SceneCatalog, SilentCues,
    StagehandError, load_module, resolve,
};

#[derive(Parser, Debug)]
#[command(name = "stagehand", version, about = "Find, pick and render the scenes in a module")]
struct Cli {
    /// Module path, e.g. `demos/shapes.rs`.
    file: PathBuf,

    /// Scene to render; prompts when omitted and the module has several.
    scene_name: Option<String>,

    /// Open the movie when done.
    #[arg(short = 'p', long)]
    preview: bool,

    /// Write the movie even when only the last frame is shown.
    #[arg(short = 'w', long)]
    write_to_movie: bool,

    /// Skip to the end and save the final frame as an image.
    #[arg(short = 's', long)]
    show_last_frame: bool,

    /// Render at 854x480.
    #[arg(short = 'l', long)]
    low_quality: bool,

    /// Render at 1280x720.
    #[arg(short = 'm', long)]
    medium_quality: bool,

    /// Also save every frame as a PNG.
    #[arg(short = 'g', long)]
    save_pngs: bool,

    /// Reveal the output in the file manager.
    #[arg(short = 'f', long)]
    show_file_in_finder: bool,

    /// Keep alpha in saved images.
    #[arg(short = 't', long)]
    transparent: bool,

    /// Suppress scene output.
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Render every scene in the module.
    #[arg(short = 'a', long)]
    write_all: bool,

    /// Output file name (without extension).
    #[arg(short = 'o', long)]
    output_name: Option<String>,

    /// Animation window as `start[,end]`.
    #[arg(short = 'n', long, value_name = "START[,END]")]
    animation_range: Option<String>,

    /// Resolution as `height[,width]`.
    #[arg(short = 'r', long, value_name = "HEIGHT[,WIDTH]")]
    resolution: Option<String>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<f64>,

    /// Output root for images and movies.
    #[arg(long)]
    media_dir: Option<PathBuf>,

    /// Base JSON config; flags given here override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// No terminal bell on completion or failure.
    #[arg(long)]
    no_sound: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };

        cfg.file = self.file;
        if let Some(name) = self.scene_name {
            cfg.scene_name = name;
        }
        cfg.write_all |= self.write_all;
        cfg.quiet |= self.quiet;
        cfg.show_last_frame |= self.show_last_frame;
        cfg.open_video_upon_completion |= self.preview;
        cfg.show_file_in_finder |= self.show_file_in_finder;
        cfg.save_pngs |= self.save_pngs;
        if self.transparent {
            cfg.saved_image_mode = ImageMode::Rgba;
        }

        // Showing only the last frame skips the animations and the movie unless the
        // movie is asked for explicitly.
        cfg.write_to_movie |= self.write_to_movie || !cfg.show_last_frame;
        cfg.skip_animations |= cfg.show_last_frame && !self.write_to_movie;

        if self.low_quality {
            cfg.camera_config = CameraConfig::low();
        } else if self.medium_quality {
            cfg.camera_config = CameraConfig::medium();
        }
        if let Some(res) = self.resolution.as_deref() {
            let (h, w) = parse_pair(res, "resolution")?;
            let w = match w {
                Some(w) => w,
                None => widescreen_width(h)?,
            };
            let background = cfg.camera_config.background;
            cfg.camera_config = CameraConfig {
                pixel_height: h,
                pixel_width: w,
                background,
            };
        }
        if let Some(range) = self.animation_range.as_deref() {
            let (start, end) = parse_pair(range, "animation range")?;
            cfg.start_at_animation_number = Some(start);
            cfg.end_at_animation_number = end;
        }
        if let Some(fps) = self.fps {
            if !(fps.is_finite() && fps > 0.0) {
                let msg = format!("fps must be positive, got {fps}");
                return Err(StagehandError::config(msg).into());
            }
            cfg.frame_duration = 1.0 / fps;
        }
        if let Some(name) = self.output_name {
            cfg.output_name = Some(name);
        }
        if let Some(dir) = self.media_dir {
            cfg.media_dir = dir;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

/// Even 16:9 width for `height`.
fn widescreen_width(height: u32) -> Result<u32, StagehandError> {
    let w = u64::from(height) * 16 / 9 / 2 * 2;
    u32::try_from(w)
        .map_err(|_| StagehandError::config(format!("resolution height {height} is too large")))
}

/// `"a"` or `"a,b"`.
fn parse_pair(s: &str, what: &str) -> Result<(u32, Option<u32>), StagehandError> {
    let num = |tok: &str| {
        tok.trim()
            .parse::<u32>()
            .map_err(|_| StagehandError::config(format!("invalid {what} '{s}'")))
    };
    match s.split_once(',') {
        Some((a, b)) => Ok((num(a)?, Some(num(b)?))),
        None => Ok((num(s)?, None)),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let no_sound = cli.no_sound;
    let config = cli.into_config()?;

    let registry = ModuleRegistry::builtin();
    let module = load_module(&config.file, &registry)?;
    let catalog = SceneCatalog::from_module(&module);

    let mut chooser = PromptChooser::new(io::stdin().lock(), io::stdout());
    let resolution = match resolve(&catalog, &config, &mut chooser) {
        Ok(resolution) => resolution,
        Err(StagehandError::InvalidSelection(reason)) => {
            tracing::debug!("invalid selection: {reason}");
            println!("{INVALID_NUMBER_MESSAGE}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let mut console = Console::stdio();
    if let Some(report) = resolution.report() {
        writeln!(console.out(), "{report}")?;
    }

    let cues: Box<dyn RunCues> = if no_sound {
        Box::new(SilentCues)
    } else {
        Box::new(BellCues)
    };
    let dispatcher = Dispatcher::for_current_host(DetachedLauncher);
    let mut orchestrator = Orchestrator::new(cues, dispatcher);

    let report = orchestrator.run_batch(resolution.scenes(), &config, &mut console);
    tracing::info!(
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "batch done"
    );
    Ok(ExitCode::SUCCESS)
}
