use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const ENDPOINT_PATH: &str = "/api/purchases.php";

/// Writes a batch orders file with one row per `(category, offer, recipient, payer)`.
pub fn write_orders(path: &Path, rows: &[[&str; 4]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["category", "offer", "recipient", "payer"])?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}
