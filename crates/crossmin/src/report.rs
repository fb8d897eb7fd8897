//! Progress reporting for strategy comparisons.
//!
//! Reports are diagnostics only; the driver ignores reporter failures.

use std::io;

pub trait Reporter {
    fn log(&mut self, text: &str) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn log(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Forwards each line to `tracing` at `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn log(&mut self, text: &str) -> io::Result<()> {
        tracing::info!(target: "crossmin::report", "{text}");
        Ok(())
    }
}

/// Writes one line per message.
#[derive(Debug)]
pub struct WriteReporter<W> {
    out: W,
}

impl<W: io::Write> WriteReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> Reporter for WriteReporter<W> {
    fn log(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }
}

impl Reporter for Vec<String> {
    fn log(&mut self, text: &str) -> io::Result<()> {
        self.push(text.to_string());
        Ok(())
    }
}
