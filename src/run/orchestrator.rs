use std::{
    io::Write as _,
    panic::{self, AssertUnwindSafe},
};

use crate::{
    foundation::{
        config::Config,
        console::Console,
        error::StagehandError,
    },
    run::{
        cues::RunCues,
        dispatch::{Dispatcher, Launcher},
    },
    scene::{TypeDef, params::SceneParams},
};

pub const SAVE_PNGS_MESSAGE: &str = "We are going to save a PNG sequence as well...";

/// Per-batch tally. Failures keep their full cause.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<StagehandError>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs a selection one scene at a time. A failing scene is reported and skipped; it
/// never stops the rest of the batch.
pub struct Orchestrator<C, L> {
    cues: C,
    dispatcher: Dispatcher<L>,
}

impl<C: RunCues, L: Launcher> Orchestrator<C, L> {
    pub fn new(cues: C, dispatcher: Dispatcher<L>) -> Self {
        Self { cues, dispatcher }
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn dispatcher(&self) -> &Dispatcher<L> {
        &self.dispatcher
    }

    #[tracing::instrument(skip_all, fields(scenes = selection.len()))]
    pub fn run_batch(
        &mut self,
        selection: &[TypeDef],
        config: &Config,
        console: &mut Console,
    ) -> BatchReport {
        let params = SceneParams::from_config(config);
        if config.save_pngs
            && let Err(e) = writeln!(console.out(), "{SAVE_PNGS_MESSAGE}")
        {
            tracing::warn!("could not announce the png sequence: {e}");
        }

        let mut report = BatchReport::default();
        for scene_type in selection {
            let name = scene_type.name().to_string();
            tracing::info!(scene = %name, "running scene");

            match self.run_one(scene_type, &params, config, console) {
                Ok(()) => {
                    tracing::info!(scene = %name, "scene finished");
                    self.cues.finished();
                    report.succeeded.push(name);
                }
                Err(cause) => {
                    tracing::error!(scene = %name, "scene failed: {cause:#}");
                    print_diagnostic(console, &name, &cause);
                    self.cues.failed();
                    report.failed.push(StagehandError::scene_execution(name, cause));
                }
            }
        }
        report
    }

    /// Construct, then post-process. Panics inside scene code count as failures.
    fn run_one(
        &mut self,
        scene_type: &TypeDef,
        params: &SceneParams,
        config: &Config,
        console: &mut Console,
    ) -> anyhow::Result<()> {
        let dispatcher = &mut self.dispatcher;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> anyhow::Result<()> {
            let mut console = console.mute_when(config.quiet);
            let mut scene = scene_type.instantiate(params, &mut console)?;
            dispatcher.dispatch(scene.as_mut(), config, &mut console)
        }));
        outcome.unwrap_or_else(|payload| {
            Err(anyhow::anyhow!("panicked: {}", panic_message(&*payload)))
        })
    }
}

/// Full cause chain (and backtrace, when captured), framed by blank lines. Best effort:
/// a dead error stream is logged and the batch carries on.
fn print_diagnostic(console: &mut Console, scene: &str, cause: &anyhow::Error) {
    let err = console.err();
    let written = write!(err, "\n\n{scene}: {cause:?}\n\n\n").and_then(|()| err.flush());
    if let Err(e) = written {
        tracing::warn!(scene, "could not print failure diagnostic: {e}");
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/run/orchestrator.rs"]
mod tests;
