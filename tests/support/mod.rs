#![allow(dead_code)]

use std::{
    cell::RefCell,
    io::{self, Write},
    path::PathBuf,
    rc::Rc,
};

use stagehand::{Console, ImageMode, Launcher, OpenCommand, RunCues, Scene};

#[derive(Clone, Default)]
pub struct Captured(Rc<RefCell<Vec<u8>>>);

impl Captured {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn captured_console() -> (Console, Captured, Captured) {
    let out = Captured::default();
    let err = Captured::default();
    (Console::new(out.clone(), err.clone()), out, err)
}

#[derive(Debug, Default)]
pub struct RecordingLauncher {
    pub launched: Vec<OpenCommand>,
}

impl Launcher for RecordingLauncher {
    fn launch(&mut self, cmd: &OpenCommand) {
        self.launched.push(cmd.clone());
    }
}

#[derive(Debug, Default)]
pub struct CountingCues {
    pub finished: usize,
    pub failed: usize,
}

impl RunCues for CountingCues {
    fn finished(&mut self) {
        self.finished += 1;
    }

    fn failed(&mut self) {
        self.failed += 1;
    }
}

pub struct StubScene;

impl Scene for StubScene {
    fn save_image(&mut self, _mode: ImageMode) -> anyhow::Result<()> {
        Ok(())
    }

    fn image_file_path(&self) -> PathBuf {
        PathBuf::from("stub.png")
    }

    fn movie_file_path(&self) -> PathBuf {
        PathBuf::from("stub.mp4")
    }
}
