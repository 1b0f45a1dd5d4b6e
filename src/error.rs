//! Error types for cheese_inventory

use reqwest::StatusCode;
use thiserror::Error;

/// Failure to turn a scanned label into a product and a weight
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarcodeError {
    /// Code is not exactly 13 characters long
    #[error("Barcode must be exactly 13 digits (got {len})")]
    InvalidLength { len: usize },
    /// Code contains characters outside ASCII
    #[error("Barcode contains non-ASCII characters: {code:?}")]
    NonAscii { code: String },
    /// Weight field is not a positive integer
    #[error("Invalid weight in barcode: {raw:?}")]
    InvalidWeight { raw: String },
    /// No product in the catalog carries this PLU
    #[error("No product found with PLU: {plu}")]
    ProductNotFound { plu: String },
}

/// Input rejected before anything is sent to the backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Barcode(#[from] BarcodeError),
    /// A required selection (reason, product, ...) was left empty
    #[error("{0} is required")]
    Missing(&'static str),
    /// Requested weight is more than the unit has left
    #[error("Insufficient stock. Available: {available}g")]
    InsufficientStock { available: u32 },
    /// Scanned remaining piece weighs more than the unit
    #[error("Scanned weight {scanned}g is greater than the available {available}g")]
    ScannedAboveRemaining { scanned: u32, available: u32 },
    /// Unit has nothing left to cut
    #[error("Unit #{0} is already depleted")]
    Depleted(u64),
    #[error("{0}")]
    Invalid(String),
}

/// Unified error type for backend calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Response body did not match the expected schema
    #[error("Failed to decode {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// Backend answered 401, the session is gone
    #[error("Session expired. Please log in again")]
    Unauthorized,
    /// No session available for an authenticated call
    #[error("Not logged in")]
    NotAuthenticated,
    /// Login was refused
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Business error reported by the backend, message kept verbatim
    #[error("{message}")]
    Backend { status: StatusCode, message: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to serialize {context}: {source}")]
    Serialize {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether this error ends the current session
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<BarcodeError> for ApiError {
    fn from(err: BarcodeError) -> Self {
        ApiError::Validation(ValidationError::Barcode(err))
    }
}

/// Result alias for backend operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;
