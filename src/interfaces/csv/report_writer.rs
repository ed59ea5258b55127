use crate::domain::catalog::Catalog;
use crate::domain::offer::Category;
use crate::domain::transaction::TransactionRecord;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct OfferRow<'a> {
    category: &'static str,
    id: &'a str,
    title: &'a str,
    price: String,
    offer_ussd: &'a str,
}

/// Writes catalog listings and transaction history as CSV.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes the offers of the given categories, in catalog order.
    pub fn write_offers(&mut self, catalog: &Catalog, categories: &[Category]) -> Result<()> {
        for &category in categories {
            for offer in catalog.offers(category) {
                self.writer.serialize(OfferRow {
                    category: category.title(),
                    id: &offer.id,
                    title: &offer.title,
                    price: offer.price.to_string(),
                    offer_ussd: &offer.activation_code,
                })?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Writes the history newest first, as handed over by the log.
    pub fn write_history(&mut self, records: &[TransactionRecord]) -> Result<()> {
        if records.is_empty() {
            self.writer
                .write_record(["id", "package", "amount", "response", "timestamp"])?;
        }
        for record in records {
            self.writer.serialize(record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
