//! Error types for the API contract

use thiserror::Error;

/// Errors raised while validating contract types
#[derive(Debug, Error)]
pub enum ApiContractError {
    #[error("request validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
