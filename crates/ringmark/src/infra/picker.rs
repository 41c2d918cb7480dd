//! Terminal pickers used by the CLI host.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::app::commands::{PickItem, Picker};

/// Prints a numbered list and reads a 1-based choice from a line of input.
///
/// An empty line or end of input cancels. Invalid answers are re-prompted.
pub struct LinePicker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Picker for LinePicker<R, W> {
    fn pick(&mut self, items: &[PickItem]) -> Result<Option<usize>> {
        for (idx, item) in items.iter().enumerate() {
            writeln!(self.output, "{:>3}. {}  {}", idx + 1, item.label, item.description)
                .context("failed to write picker list")?;
        }

        loop {
            write!(self.output, "Select a bookmark [1-{}]: ", items.len())
                .context("failed to write picker prompt")?;
            self.output.flush().context("failed to flush picker prompt")?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read picker choice")?;
            let answer = line.trim();
            if read == 0 || answer.is_empty() {
                return Ok(None);
            }

            match answer.parse::<usize>() {
                Ok(choice) if (1..=items.len()).contains(&choice) => return Ok(Some(choice - 1)),
                _ => {
                    writeln!(self.output, "'{answer}' is not a listed bookmark")
                        .context("failed to write picker prompt")?;
                }
            }
        }
    }
}

/// Answers every pick with a preselected 0-based index.
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker {
    index: usize,
}

impl FixedPicker {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Picker for FixedPicker {
    fn pick(&mut self, _items: &[PickItem]) -> Result<Option<usize>> {
        Ok(Some(self.index))
    }
}
