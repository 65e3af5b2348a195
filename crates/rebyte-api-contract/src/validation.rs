//! Request validation helpers

use crate::error::ApiContractError;
use validator::Validate;

/// Validate a request type before it is sent to the service
pub fn validate_request<T: Validate>(request: &T) -> Result<(), ApiContractError> {
    request.validate()?;
    Ok(())
}
