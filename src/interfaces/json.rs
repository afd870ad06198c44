use crate::domain::order::Order;
use crate::error::Result;
use std::io::Read;

/// Reads an order collection from a JSON array.
///
/// Orders carry nested line items, so they travel as JSON (the shape the
/// orders backend returns) rather than flat CSV rows.
pub struct OrderReader<R: Read> {
    source: R,
}

impl<R: Read> OrderReader<R> {
    /// Creates a new `OrderReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn orders(self) -> Result<Vec<Order>> {
        Ok(serde_json::from_reader(self.source)?)
    }
}
