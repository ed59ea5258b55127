use super::offer::Offer;
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// A resolved purchase attempt as kept in the transaction history.
///
/// The package title is copied out of the offer so later catalog changes never
/// rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    /// Creation instant in RFC 3339 with nanosecond precision, suffixed with a
    /// process-wide sequence number so records created in the same instant
    /// stay distinct.
    pub id: String,
    #[serde(rename = "package")]
    pub package_title: String,
    pub amount: u32,
    #[serde(rename = "response")]
    pub response_text: String,
    pub timestamp: String,
}

impl TransactionRecord {
    pub fn new(package_title: &str, amount: u32, response_text: &str) -> Self {
        Self::created_at(Utc::now(), package_title, amount, response_text)
    }

    /// Record for an attempt that resolved against `offer`.
    pub fn for_offer(offer: &Offer, response_text: &str) -> Self {
        Self::new(&offer.title, offer.amount(), response_text)
    }

    pub fn created_at(
        at: DateTime<Utc>,
        package_title: &str,
        amount: u32,
        response_text: &str,
    ) -> Self {
        Self {
            id: format!(
                "{}-{}",
                at.to_rfc3339_opts(SecondsFormat::Nanos, true),
                NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed)
            ),
            package_title: package_title.to_string(),
            amount,
            response_text: response_text.to_string(),
            timestamp: at
                .with_timezone(&Local)
                .format("%-d/%-m/%Y, %H:%M:%S")
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::offer::Price;
    use chrono::TimeZone;

    #[test]
    fn test_record_copies_offer_fields() {
        let offer = Offer::new("b1", "1GB for 1hr @19", Price::kes(19), "*1#");
        let record = TransactionRecord::for_offer(&offer, "Success");

        assert_eq!(record.package_title, "1GB for 1hr @19");
        assert_eq!(record.amount, 19);
        assert_eq!(record.response_text, "Success");
        assert!(!record.timestamp.is_empty());
    }

    #[test]
    fn test_record_id_derived_from_creation_time() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
        let record = TransactionRecord::created_at(at, "20 SMS @5", 5, "Success");
        assert!(record.id.starts_with("2025-03-01T08:30:00.000000000Z-"));
    }

    #[test]
    fn test_records_created_in_same_instant_have_distinct_ids() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
        let first = TransactionRecord::created_at(at, "20 SMS @5", 5, "Success");
        let second = TransactionRecord::created_at(at, "20 SMS @5", 5, "Success");

        assert_ne!(first.id, second.id);
        assert_eq!(first.timestamp, second.timestamp);
    }
}
