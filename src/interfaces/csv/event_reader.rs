use crate::domain::event::CartEvent;
use crate::error::{CartError, Result};
use std::io::Read;

/// Reads scripted cart events from a CSV source.
///
/// Whitespace around fields is trimmed and rows may omit trailing empty
/// columns.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    /// Creates a new `EventReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes events in file order.
    pub fn events(self) -> impl Iterator<Item = Result<CartEvent>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CartError::from))
    }
}
