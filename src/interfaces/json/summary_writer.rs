use crate::application::checkout::CartSummary;
use crate::error::Result;
use std::io::Write;

/// Writes cart summaries as a pretty-printed JSON array.
pub struct SummaryWriter<W: Write> {
    sink: W,
}

impl<W: Write> SummaryWriter<W> {
    /// Creates a new `SummaryWriter` over any `Write` sink (e.g., Stdout).
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn write_summaries(&mut self, summaries: Vec<CartSummary>) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.sink, &summaries)?;
        writeln!(self.sink)?;
        self.sink.flush()?;
        Ok(())
    }
}
