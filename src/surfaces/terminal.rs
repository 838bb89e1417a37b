//! Terminal display surface

use std::io::{self, IsTerminal, Stdout, Write};

use crate::error::SurfaceError;

use super::DisplaySurface;

/// Clear the current line and return the cursor to its start
const CLEAR_LINE: &str = "\r\x1b[2K";

/// How successive renders share the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Redraw a single line in place
    Overwrite,
    /// One line per render
    Append,
}

/// Writes countdown text to a byte sink, usually stdout
pub struct TerminalSurface<W: Write + Send + 'static> {
    out: W,
    mode: LineMode,
}

impl TerminalSurface<Stdout> {
    /// Stdout, redrawing in place when it is a terminal
    pub fn stdout() -> Self {
        let out = io::stdout();
        let mode = if out.is_terminal() {
            LineMode::Overwrite
        } else {
            LineMode::Append
        };
        Self::new(out, mode)
    }
}

impl<W: Write + Send + 'static> TerminalSurface<W> {
    pub fn new(out: W, mode: LineMode) -> Self {
        Self { out, mode }
    }

    pub fn mode(&self) -> LineMode {
        self.mode
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> DisplaySurface for TerminalSurface<W> {
    fn write_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        match self.mode {
            LineMode::Overwrite => write!(self.out, "{CLEAR_LINE}{text}")?,
            LineMode::Append => writeln!(self.out, "{text}")?,
        }
        self.out.flush()?;
        Ok(())
    }

    fn write_final(&mut self, text: &str) -> Result<(), SurfaceError> {
        match self.mode {
            LineMode::Overwrite => writeln!(self.out, "{CLEAR_LINE}{text}")?,
            LineMode::Append => writeln!(self.out, "{text}")?,
        }
        self.out.flush()?;
        Ok(())
    }
}
