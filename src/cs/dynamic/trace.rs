//! Comma-separated dump of every trial the investment solver examines, for
//! plotting the value surface offline.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::warn;

use crate::cs::dynamic::backward_induction::TrialTrace;
use crate::error::Result;

/// Writes `state,decision,value` lines with two decimals, and a blank line
/// after each state row.
///
/// The first write error stops further output; it is returned by
/// [`finish`](CsvTrace::finish).
#[derive(Debug)]
pub struct CsvTrace<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl CsvTrace<BufWriter<File>> {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> CsvTrace<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flushes the output and hands back the writer.
    pub fn finish(mut self) -> Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err.into());
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_line(&mut self, args: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_fmt(args) {
            warn!("trial trace stopped: {err}");
            self.error = Some(err);
        }
    }
}

impl<W: Write> TrialTrace<f64, f64> for CsvTrace<W> {
    fn record(&mut self, state: f64, decision: f64, value: f64) {
        self.write_line(format_args!("{:.2},{:.2},{:.2}\n", state, decision, value));
    }

    fn end_row(&mut self) {
        self.write_line(format_args!("\n"));
    }
}
