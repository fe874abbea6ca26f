use std::{
    fmt,
    io::{self, Write},
    ops::{Deref, DerefMut},
};

/// User-facing output streams.
///
/// Everything the orchestrator and the bundled scenes print goes through a `Console`
/// rather than the process-wide stdout, so quiet mode is a scoped swap of the output
/// stream instead of global mutation. The error stream is never muted.
pub struct Console {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
    sink: io::Sink,
    muted: bool,
}

impl Console {
    /// Console bound to the process stdout/stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }

    pub fn new(out: impl Write + 'static, err: impl Write + 'static) -> Self {
        Self {
            out: Box::new(out),
            err: Box::new(err),
            sink: io::sink(),
            muted: false,
        }
    }

    /// Output stream; a null sink while muted.
    pub fn out(&mut self) -> &mut dyn Write {
        if self.muted {
            &mut self.sink
        } else {
            self.out.as_mut()
        }
    }

    pub fn err(&mut self) -> &mut dyn Write {
        self.err.as_mut()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Mute the output stream until the returned guard drops.
    pub fn mute(&mut self) -> Muted<'_> {
        self.mute_when(true)
    }

    /// Like [`Console::mute`], but only mutes when `quiet` is set. The previous state is
    /// restored on drop either way, including during unwinding.
    pub fn mute_when(&mut self, quiet: bool) -> Muted<'_> {
        let prev = self.muted;
        if quiet && !prev {
            let _ = self.out.flush();
        }
        self.muted = prev || quiet;
        Muted {
            console: self,
            prev,
        }
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}

/// Scoped mute guard returned by [`Console::mute_when`].
pub struct Muted<'a> {
    console: &'a mut Console,
    prev: bool,
}

impl Deref for Muted<'_> {
    type Target = Console;

    fn deref(&self) -> &Console {
        self.console
    }
}

impl DerefMut for Muted<'_> {
    fn deref_mut(&mut self) -> &mut Console {
        self.console
    }
}

impl Drop for Muted<'_> {
    fn drop(&mut self) {
        self.console.muted = self.prev;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/console.rs"]
mod tests;
