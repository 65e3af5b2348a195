//! Client configuration

use std::env;

use thiserror::Error;
use url::Url;

use crate::auth::AuthScheme;

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "REBYTE_API_KEY";
/// Environment variable overriding the API base URL
pub const BASE_URL_VAR: &str = "REBYTE_BASE_URL";
/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.rebyte.ai";

/// Errors raised at client construction time
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    MissingApiKey(&'static str),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Connection settings for [`RestClient`](crate::RestClient).
///
/// Passed explicitly at construction; [`ClientConfig::from_env`] is the
/// only place that reads the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: Url,
    pub auth: AuthScheme,
}

impl ClientConfig {
    /// Configuration with an explicit key and base URL
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: api_key.into(),
            base_url: Url::parse(base_url)?,
            auth: AuthScheme::default(),
        })
    }

    /// Load configuration from `REBYTE_API_KEY` and `REBYTE_BASE_URL`.
    ///
    /// A missing or empty credential is a configuration error, raised here
    /// and never retried.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;
        let base_url =
            env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(api_key, &base_url)
    }

    /// Override the authentication scheme
    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config() {
        let config = ClientConfig::new("secret", "http://localhost:8080").unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.auth, AuthScheme::ApiKey);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(matches!(
            ClientConfig::new("secret", "not a url"),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_from_env_requires_api_key() {
        // Single test mutating the process environment to avoid races
        // between parallel tests.
        env::remove_var(API_KEY_VAR);
        env::remove_var(BASE_URL_VAR);
        assert!(matches!(
            ClientConfig::from_env(),
            Err(ConfigError::MissingApiKey(_))
        ));

        env::set_var(API_KEY_VAR, "");
        assert!(ClientConfig::from_env().is_err());

        env::set_var(API_KEY_VAR, "from-env");
        env::set_var(BASE_URL_VAR, "http://localhost:9000");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.base_url.as_str(), "http://localhost:9000/");

        env::remove_var(API_KEY_VAR);
        env::remove_var(BASE_URL_VAR);
    }
}
