use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Error taxonomy for the billing core.
///
/// `Validation`, `Conflict` and `Transport` are the outcomes a caller is
/// expected to pattern-match on; `InFlight` marks the no-op rejection of a
/// duplicate submission. The remaining variants wrap interface-layer failures.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("a payment for order {0} is already in flight")]
    InFlight(i64),
    #[error("payment service unavailable: {0}")]
    Transport(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
