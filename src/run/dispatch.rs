use std::{
    ffi::OsString,
    io::Write as _,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    foundation::{config::Config, console::Console},
    scene::Scene,
};

/// Operating-system family, which decides the default-application opener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostOs {
    /// macOS and anything unrecognized: `open`.
    Mac,
    /// `xdg-open`.
    Linux,
    /// `start`.
    Windows,
}

impl HostOs {
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            HostOs::Linux
        } else if cfg!(target_os = "windows") {
            HostOs::Windows
        } else {
            HostOs::Mac
        }
    }

    pub fn opener(self) -> &'static str {
        match self {
            HostOs::Mac => "open",
            HostOs::Linux => "xdg-open",
            HostOs::Windows => "start",
        }
    }
}

/// Flag asking the opener to reveal the file in the file manager.
pub const REVEAL_FLAG: &str = "-R";

/// `<opener> [-R] <path>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenCommand {
    pub program: &'static str,
    pub args: Vec<OsString>,
}

impl OpenCommand {
    /// The process to spawn. `start` is a shell builtin on Windows, so it goes through
    /// `cmd /C start ""`.
    pub fn to_command(&self) -> Command {
        let mut cmd = if self.program == HostOs::Windows.opener() && cfg!(windows) {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else {
            Command::new(self.program)
        };
        cmd.args(&self.args);
        cmd
    }
}

pub fn open_command(host: HostOs, reveal: bool, path: &Path) -> OpenCommand {
    let mut args = Vec::with_capacity(2);
    if reveal {
        args.push(OsString::from(REVEAL_FLAG));
    }
    args.push(path.as_os_str().to_owned());
    OpenCommand {
        program: host.opener(),
        args,
    }
}

/// What to open after a run, if anything: the saved still when the last frame was
/// shown, the movie otherwise.
pub fn open_target(scene: &dyn Scene, config: &Config) -> Option<PathBuf> {
    if !config.wants_open() {
        return None;
    }
    Some(if config.show_last_frame {
        scene.image_file_path()
    } else {
        scene.movie_file_path()
    })
}

/// Starts an [`OpenCommand`]. Best effort: failures are not reported to the caller.
pub trait Launcher {
    fn launch(&mut self, cmd: &OpenCommand);
}

/// Spawns the opener with stdout and stderr discarded and never waits for it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedLauncher;

impl Launcher for DetachedLauncher {
    fn launch(&mut self, cmd: &OpenCommand) {
        let spawned = cmd
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => {
                tracing::debug!(program = cmd.program, pid = child.id(), "opener spawned")
            }
            Err(e) => tracing::warn!(program = cmd.program, "failed to spawn opener: {e}"),
        }
    }
}

/// Post-processing for one finished scene: still image, then the opener.
#[derive(Debug)]
pub struct Dispatcher<L> {
    host: HostOs,
    launcher: L,
}

impl<L: Launcher> Dispatcher<L> {
    pub fn new(host: HostOs, launcher: L) -> Self {
        Self { host, launcher }
    }

    pub fn for_current_host(launcher: L) -> Self {
        Self::new(HostOs::current(), launcher)
    }

    pub fn host(&self) -> HostOs {
        self.host
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Output is muted for the whole call when `quiet` is set and restored on every
    /// return path.
    #[tracing::instrument(skip_all)]
    pub fn dispatch(
        &mut self,
        scene: &mut dyn Scene,
        config: &Config,
        console: &mut Console,
    ) -> anyhow::Result<()> {
        let mut console = console.mute_when(config.quiet);

        if config.show_last_frame {
            scene
                .save_image(config.saved_image_mode)
                .context("save last frame")?;
            let path = scene.image_file_path();
            writeln!(console.out(), "Saved image to {}", path.display())?;
        }

        if let Some(path) = open_target(scene, config) {
            let cmd = open_command(self.host, config.show_file_in_finder, &path);
            tracing::debug!(?cmd, "opening output");
            self.launcher.launch(&cmd);
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/run/dispatch.rs"]
mod tests;
