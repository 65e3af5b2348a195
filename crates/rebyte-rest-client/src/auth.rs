//! Authentication schemes for the REST API client

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

/// How the API credential is attached to each request.
///
/// The task endpoints take the key in an `API_KEY` header; the skill-store
/// deployment of the same service takes a bearer token. Header names are
/// case-insensitive on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// `API_KEY: <key>`
    #[default]
    ApiKey,
    /// `Authorization: Bearer <key>`
    Bearer,
}

impl AuthScheme {
    /// Build the request headers carrying the credential
    pub fn headers(&self, api_key: &str) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        match self {
            AuthScheme::ApiKey => {
                headers.insert(
                    HeaderName::from_static("api_key"),
                    HeaderValue::from_str(api_key)?,
                );
            }
            AuthScheme::Bearer => {
                let value = format!("Bearer {}", api_key);
                headers.insert(AUTHORIZATION, HeaderValue::from_str(&value)?);
            }
        }
        Ok(headers)
    }
}
