//! Stagehand finds the scenes a module defines, works out which ones to run, and runs
//! them one after another.
//!
//! # Flow
//!
//! 1. **Load**: a source path (`demos/shapes.rs`) becomes a module name
//!    (`demos::shapes`) that is looked up in a [`ModuleRegistry`].
//! 2. **Discover**: the module's top-level [`Binding`]s are filtered through
//!    [`is_scene`] into a [`SceneCatalog`].
//! 3. **Select**: [`resolve`] applies the configuration and, when the request is
//!    ambiguous, asks a [`Chooser`] (normally the numbered [`PromptChooser`] menu).
//! 4. **Run**: [`Orchestrator::run_batch`] constructs each scene (constructing *is*
//!    rendering), hands it to the [`Dispatcher`] for the still image and the host opener,
//!    and fires a [`RunCues`] signal. One scene failing never stops the others.
//!
//! Scene output goes through a [`Console`], so quiet mode is a scoped mute instead of a
//! swap of the process stdout.
#![forbid(unsafe_code)]

mod demos;
mod encode;
mod foundation;
mod module;
mod render;
mod run;
mod scene;
mod select;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;

pub use encode::ffmpeg::{EncodeConfig, FfmpegEncoder, flatten_onto};
pub use foundation::config::{CameraConfig, Config, ImageMode};
pub use foundation::console::{Console, Muted};
pub use foundation::error::{StagehandError, StagehandResult};
pub use module::catalog::SceneCatalog;
pub use module::loader::{
    MODULE_SEPARATOR, ModuleFactory, ModuleRegistry, SOURCE_SUFFIX, SceneModule, load_module,
    module_name_for_path,
};
pub use render::recorder::{Recorder, save_png};
pub use run::cues::{BellCues, RunCues, SilentCues};
pub use run::dispatch::{
    DetachedLauncher, Dispatcher, HostOs, Launcher, OpenCommand, REVEAL_FLAG, open_command,
    open_target,
};
pub use run::orchestrator::{BatchReport, Orchestrator, SAVE_PNGS_MESSAGE};
pub use scene::params::SceneParams;
pub use scene::{Binding, Scene, SceneCtor, TypeDef, is_scene};
pub use select::chooser::{
    CHOOSE_NUMBER_MESSAGE, INVALID_NUMBER_MESSAGE, PromptChooser, parse_choices,
    prompt_user_for_choice,
};
pub use select::resolver::{
    Chooser, NO_SCENE_MESSAGE, Resolution, SCENE_NOT_FOUND_MESSAGE, resolve,
};
