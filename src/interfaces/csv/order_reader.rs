use crate::domain::offer::Category;
use crate::error::{PurchaseError, Result};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One row of a batch purchase file.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PurchaseOrder {
    #[serde(deserialize_with = "deserialize_category")]
    pub category: Category,
    pub offer: String,
    pub recipient: String,
    pub payer: String,
}

fn deserialize_category<'de, D>(deserializer: D) -> std::result::Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Reads purchase orders from a CSV source with the header
/// `category, offer, recipient, payer`.
pub struct OrderReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderReader<R> {
    /// Creates a new `OrderReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes orders.
    pub fn orders(self) -> impl Iterator<Item = Result<PurchaseOrder>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PurchaseError::from))
    }
}
