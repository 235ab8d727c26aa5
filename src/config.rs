//! Configuration for the jobdeck client.

use std::time::Duration;

use crate::error::ConfigError;

/// Default API origin when `JOBDECK_API_URL` is not set.
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Main configuration for the client core.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api: ApiConfig,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            api: ApiConfig::from_env()?,
        })
    }
}

/// Transport configuration.
///
/// The base URL and credential mode are process-wide: they are read once at
/// startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin of the job-board API server, e.g. `http://localhost:8000`.
    /// The `/api/v1` prefix is appended per request, not configured here.
    pub base_url: String,

    /// Optional request timeout. When unset the transport's default
    /// behavior governs.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("JOBDECK_API_URL").ok(),
            std::env::var("JOBDECK_HTTP_TIMEOUT_SECS").ok(),
        )
    }

    fn from_vars(
        base_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        url::Url::parse(&base_url).map_err(|e| ConfigError::InvalidValue {
            key: "JOBDECK_API_URL".to_string(),
            message: e.to_string(),
        })?;

        let timeout = match timeout_secs {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "JOBDECK_HTTP_TIMEOUT_SECS".to_string(),
                    message: format!("expected an integer number of seconds, got {:?}", raw),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self { base_url, timeout })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ApiConfig::from_vars(None, None).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let config = ApiConfig::from_vars(Some("  ".to_string()), None).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn explicit_url_and_timeout() {
        let config = ApiConfig::from_vars(
            Some("https://jobs.example.com".to_string()),
            Some("30".to_string()),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://jobs.example.com");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_invalid_url() {
        let err = ApiConfig::from_vars(Some("not a url".to_string()), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "JOBDECK_API_URL"));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = ApiConfig::from_vars(None, Some("soon".to_string())).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { key, .. } if key == "JOBDECK_HTTP_TIMEOUT_SECS")
        );
    }
}
