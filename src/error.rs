use thiserror::Error;

#[derive(Error, Debug)]
pub enum PurchaseError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid price '{0}': expected 'KES <amount>'")]
    InvalidPrice(String),
    #[error("Duplicate offer id '{id}' in {category}")]
    DuplicateOffer { category: String, id: String },
    #[error("Unknown offer '{id}' in {category}")]
    UnknownOffer { category: String, id: String },
    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, PurchaseError>;

/// Misuse of the purchase flow from the presentation side.
///
/// These never describe the outcome of a purchase; outcomes are always a
/// [`PurchaseOutcome`](crate::domain::purchase::PurchaseOutcome).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlowError {
    #[error("Phone input '{0}' must be at most 10 digits")]
    InvalidPhoneInput(String),
    #[error("Both phone numbers must have exactly 10 digits")]
    IncompleteForm,
    #[error("A purchase is already being submitted")]
    SubmitInProgress,
    #[error("No purchase form is open")]
    FormClosed,
    #[error("The previous purchase result has not been dismissed")]
    ResultPending,
}
