use super::purchase::{PurchasePayload, PurchaseResponse};
use super::transaction::TransactionRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The remote endpoint that fulfils purchases.
#[async_trait]
pub trait PurchaseService: Send + Sync {
    async fn purchase(&self, payload: &PurchasePayload) -> Result<PurchaseResponse>;
}

/// Append-only history of resolved purchase attempts, newest first.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    /// Inserts `record` at the front. Never rejects and never deduplicates.
    async fn append(&self, record: TransactionRecord);
    /// Snapshot of every record, newest first.
    async fn read_all(&self) -> Vec<TransactionRecord>;
}

pub type PurchaseServiceRef = Arc<dyn PurchaseService>;
pub type TransactionLogRef = Arc<dyn TransactionLog>;
