use crate::domain::ports::PurchaseService;
use crate::domain::purchase::{PurchasePayload, PurchaseResponse};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// HTTP client for the remote purchase endpoint.
///
/// No timeout and no retries: a request runs until the transport resolves it.
#[derive(Clone)]
pub struct HttpPurchaseService {
    client: Client,
    endpoint: String,
}

impl HttpPurchaseService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

/// Reads a non-empty string `status` out of a reply body, if there is one.
fn status_of(body: &Value) -> Option<String> {
    body.get("status")
        .and_then(Value::as_str)
        .filter(|status| !status.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl PurchaseService for HttpPurchaseService {
    async fn purchase(&self, payload: &PurchasePayload) -> Result<PurchaseResponse> {
        let body = serde_json::to_vec(payload)?;

        tracing::debug!(endpoint = %self.endpoint, "posting purchase request");
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        let reply: Value = response.json().await?;
        Ok(PurchaseResponse {
            status: status_of(&reply),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_extraction() {
        assert_eq!(
            status_of(&json!({"status": "Success"})),
            Some("Success".to_string())
        );
        assert_eq!(status_of(&json!({})), None);
        assert_eq!(status_of(&json!({"status": ""})), None);
        assert_eq!(status_of(&json!({"status": null})), None);
        assert_eq!(status_of(&json!(null)), None);
        assert_eq!(status_of(&json!(["status"])), None);
    }
}
