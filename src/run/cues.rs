use std::io::Write as _;

/// Completion signals fired once per batch item.
pub trait RunCues {
    fn finished(&mut self);
    fn failed(&mut self);
}

impl<T: RunCues + ?Sized> RunCues for Box<T> {
    fn finished(&mut self) {
        (**self).finished();
    }

    fn failed(&mut self) {
        (**self).failed();
    }
}

/// No audible cues.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCues;

impl RunCues for SilentCues {
    fn finished(&mut self) {}

    fn failed(&mut self) {}
}

/// Rings the terminal bell: once on success, twice on failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct BellCues;

impl BellCues {
    fn ring(times: usize) {
        let mut err = std::io::stderr();
        let _ = err.write_all(&b"\x07".repeat(times));
        let _ = err.flush();
    }
}

impl RunCues for BellCues {
    fn finished(&mut self) {
        tracing::debug!("finish cue");
        Self::ring(1);
    }

    fn failed(&mut self) {
        tracing::debug!("failure cue");
        Self::ring(2);
    }
}
