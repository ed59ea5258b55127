use crate::domain::ports::TransactionLog;
use crate::domain::transaction::TransactionRecord;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A shared in-memory transaction history.
///
/// Clones share the same underlying `Arc<RwLock<VecDeque<_>>>`, so the
/// composition root can hand one handle to every purchase flow and keep another
/// for rendering. Nothing survives a restart.
#[derive(Default, Clone)]
pub struct InMemoryTransactionLog {
    records: Arc<RwLock<VecDeque<TransactionRecord>>>,
}

impl InMemoryTransactionLog {
    /// Creates a new, empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn append(&self, record: TransactionRecord) {
        let mut records = self.records.write().await;
        tracing::debug!(id = %record.id, package = %record.package_title, "recording transaction");
        records.push_front(record);
    }

    async fn read_all(&self) -> Vec<TransactionRecord> {
        let records = self.records.read().await;
        records.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> TransactionRecord {
        TransactionRecord::new(title, 10, "Success")
    }

    #[tokio::test]
    async fn test_append_prepends() {
        let log = InMemoryTransactionLog::new();
        assert!(log.is_empty().await);

        log.append(record("first")).await;
        log.append(record("second")).await;
        log.append(record("third")).await;

        let titles: Vec<_> = log
            .read_all()
            .await
            .into_iter()
            .map(|r| r.package_title)
            .collect();
        assert_eq!(titles, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_append_keeps_duplicates() {
        let log = InMemoryTransactionLog::new();
        let r = record("same");
        log.append(r.clone()).await;
        log.append(r.clone()).await;

        assert_eq!(log.len().await, 2);
        assert_eq!(log.read_all().await, vec![r.clone(), r]);
    }

    #[tokio::test]
    async fn test_clones_share_history() {
        let log = InMemoryTransactionLog::new();
        let handle = log.clone();

        handle.append(record("shared")).await;
        assert_eq!(log.read_all().await[0].package_title, "shared");
    }

    #[tokio::test]
    async fn test_read_all_is_a_snapshot() {
        let log = InMemoryTransactionLog::new();
        log.append(record("kept")).await;

        let mut snapshot = log.read_all().await;
        snapshot.clear();

        assert_eq!(log.len().await, 1);
    }
}
