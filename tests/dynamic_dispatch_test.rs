use bingwa::domain::ports::{PurchaseServiceRef, TransactionLog, TransactionLogRef};
use bingwa::domain::transaction::TransactionRecord;
use bingwa::infrastructure::http::HttpPurchaseService;
use bingwa::infrastructure::in_memory::InMemoryTransactionLog;
use std::sync::Arc;

#[tokio::test]
async fn test_ports_as_trait_objects() {
    let log = InMemoryTransactionLog::new();
    let first: TransactionLogRef = Arc::new(log.clone());
    let second: TransactionLogRef = Arc::new(log.clone());

    // Verify Send + Sync by spawning tasks
    let first_handle = tokio::spawn(async move {
        first
            .append(TransactionRecord::new("20 SMS @5", 5, "Success"))
            .await;
    });
    let second_handle = tokio::spawn(async move {
        second
            .append(TransactionRecord::new("200 sms @10", 10, "Success"))
            .await;
    });

    first_handle.await.unwrap();
    second_handle.await.unwrap();

    let history = log.read_all().await;
    assert_eq!(history.len(), 2);

    let service: PurchaseServiceRef = Arc::new(HttpPurchaseService::new("http://127.0.0.1:1"));
    let handle = tokio::spawn(async move { drop(service) });
    handle.await.unwrap();
}
