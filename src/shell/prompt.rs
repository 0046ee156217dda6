//! Line-oriented prompting over any reader/writer pair

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::TrackerResult;

/// Reads answers from `input` and writes prompts and messages to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line of text
    pub fn say(&mut self, text: impl Display) -> TrackerResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Show `prompt` and read one trimmed answer
    ///
    /// Returns `None` once the input is exhausted. Bytes that are not valid
    /// UTF-8 are replaced, so a garbled line reads as an invalid answer.
    pub fn ask(&mut self, prompt: &str) -> TrackerResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut answer = Vec::new();
        if self.input.read_until(b'\n', &mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&answer).trim().to_string()))
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
