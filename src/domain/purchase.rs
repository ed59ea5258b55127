use super::offer::Offer;
use super::phone::PhoneNumber;
use serde::Serialize;

pub const NO_STATUS_MESSAGE: &str = "No status returned from server.";
pub const SOMETHING_WENT_WRONG_MESSAGE: &str = "Purchase failed: Something went wrong.";
pub const NO_PACKAGE_SELECTED_MESSAGE: &str = "Purchase failed: No package selected.";

/// Value of the `action` field expected by the purchase endpoint.
pub const PURCHASE_ACTION: &str = "purchase_bundle";

/// A validated purchase, ready to be sent.
///
/// The offer is borrowed from the [`Catalog`](super::catalog::Catalog) for the
/// lifetime of the attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest<'c> {
    pub offer: &'c Offer,
    pub recipient: PhoneNumber,
    pub payer: PhoneNumber,
}

/// JSON body posted to the remote purchase service.
///
/// Owns its fields so it can outlive the borrowed [`PurchaseRequest`] while the
/// call is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchasePayload {
    pub user_id: u64,
    pub offer_amount: u32,
    pub phone_number: String,
    pub mpesa_phone: String,
    pub offer_ussd: String,
    pub action: &'static str,
}

impl PurchasePayload {
    pub fn new(user_id: u64, request: &PurchaseRequest<'_>) -> Self {
        Self {
            user_id,
            offer_amount: request.offer.amount(),
            phone_number: request.recipient.as_str().to_string(),
            mpesa_phone: request.payer.as_str().to_string(),
            offer_ussd: request.offer.activation_code.clone(),
            action: PURCHASE_ACTION,
        }
    }
}

/// What the remote service reported back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseResponse {
    pub status: Option<String>,
}

impl PurchaseResponse {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
        }
    }
}

/// How a purchase attempt resolved, always carrying a message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Success { text: String },
    Failure { text: String },
}

impl PurchaseOutcome {
    /// Maps a service reply to an outcome; a missing status is still a success.
    pub fn from_response(response: PurchaseResponse) -> Self {
        let text = response
            .status
            .unwrap_or_else(|| NO_STATUS_MESSAGE.to_string());
        PurchaseOutcome::Success { text }
    }

    pub fn transport_failure() -> Self {
        PurchaseOutcome::Failure {
            text: SOMETHING_WENT_WRONG_MESSAGE.to_string(),
        }
    }

    pub fn no_package_selected() -> Self {
        PurchaseOutcome::Failure {
            text: NO_PACKAGE_SELECTED_MESSAGE.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            PurchaseOutcome::Success { text } | PurchaseOutcome::Failure { text } => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PurchaseOutcome::Success { .. })
    }
}
