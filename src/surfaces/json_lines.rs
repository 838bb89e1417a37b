//! JSON lines display surface, for piping countdown output into other tools

use std::io::{self, Stdout, Write};

use serde::Serialize;

use crate::error::SurfaceError;

use super::DisplaySurface;

#[derive(Serialize)]
struct Frame<'a> {
    seq: u64,
    text: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    last: bool,
}

/// Writes each render as one JSON object per line
pub struct JsonLinesSurface<W: Write + Send + 'static> {
    out: W,
    seq: u64,
}

impl JsonLinesSurface<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> JsonLinesSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, seq: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str, last: bool) -> Result<(), SurfaceError> {
        let frame = Frame { seq: self.seq, text, last };
        serde_json::to_writer(&mut self.out, &frame)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.seq += 1;
        Ok(())
    }
}

impl<W: Write + Send + 'static> DisplaySurface for JsonLinesSurface<W> {
    fn write_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.emit(text, false)
    }

    fn write_final(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.emit(text, true)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn frames_are_numbered_and_final_one_is_marked() {
        let mut surface = JsonLinesSurface::new(Vec::new());

        surface.write_text("0h 0m 1s").unwrap();
        surface.write_final("The match has started!").unwrap();

        let output = String::from_utf8(surface.into_inner()).unwrap();
        let frames: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0]["seq"], 0);
        assert_eq!(frames[0]["text"], "0h 0m 1s");
        assert!(frames[0].get("last").is_none());
        assert_eq!(frames[1]["seq"], 1);
        assert_eq!(frames[1]["last"], true);
    }
}
