use std::io::{self, Write};

use crate::thermal_pipeline::common::error::Result;
use crate::thermal_pipeline::render::ansi;

/// Destination for composed display text.
pub trait DisplaySink {
    fn clear(&mut self) -> Result<()>;
    fn present(&mut self, text: &str) -> Result<()>;
}

/// Writes to any `Write`, stdout by default.
pub struct TerminalSink<W: Write = io::Stdout> {
    out: W,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn clear(&mut self) -> Result<()> {
        self.out.write_all(ansi::CLEAR_SCREEN.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn present(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
