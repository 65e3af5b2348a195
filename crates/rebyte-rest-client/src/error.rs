//! Error types for the REST API client

use rebyte_api_contract::ErrorBody;
use rebyte_client_api::ClientApiError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur when using the REST API client
#[derive(Debug, Error)]
pub enum RestClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid request: {0}")]
    Contract(#[from] rebyte_api_contract::ApiContractError),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("server returned HTTP {status}: {}", .body.message())]
    Api { status: StatusCode, body: ErrorBody },

    #[error("unexpected response format: {0}")]
    UnexpectedResponse(String),
}

/// Result type alias for REST client operations
pub type RestClientResult<T> = Result<T, RestClientError>;

impl From<RestClientError> for ClientApiError {
    fn from(error: RestClientError) -> Self {
        match error {
            RestClientError::Api { status, body } => ClientApiError::Api {
                status: status.as_u16(),
                message: body.message(),
            },
            RestClientError::Http(e) => ClientApiError::Transport(e.to_string()),
            other => ClientApiError::Unexpected(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_maps_status_and_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": {"message": "task not found"}}"#).unwrap();
        let error = RestClientError::Api {
            status: StatusCode::NOT_FOUND,
            body,
        };

        match ClientApiError::from(error) {
            ClientApiError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "task not found");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_config_error_is_not_transport() {
        let error = RestClientError::Config(ConfigError::MissingApiKey("REBYTE_API_KEY"));
        assert!(matches!(
            ClientApiError::from(error),
            ClientApiError::Unexpected(_)
        ));
    }
}
