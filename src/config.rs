//! Resolver configuration.

use crate::{
    BmcResult, PollingOptions,
    core::domain::{error::ValidationError, value_object::serde_helpers::duration_secs},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Request rate limit applied to every constructed Redfish client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

/// Settings shared by every client a resolver constructs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverConfig {
    /// Talk plain HTTP instead of HTTPS.
    pub insecure: bool,
    /// Skip TLS certificate verification (self-signed BMC certificates).
    pub accept_invalid_certs: bool,
    pub polling: PollingOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitConfig>,
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            insecure: false,
            accept_invalid_certs: false,
            polling: PollingOptions::default(),
            rate_limit: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ResolverConfig {
    /// Loads a configuration from a JSON file; absent fields take their defaults.
    ///
    /// # Errors
    /// Returns `BmcError::Validation` if the file cannot be read or parsed,
    /// or if it holds a zero rate limit, timeout or polling interval.
    pub async fn from_json_file(path: impl AsRef<Path>) -> BmcResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            ValidationError::Field {
                field: "config".to_string(),
                message: format!("cannot read {}: {}", path.display(), e),
            }
        })?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| ValidationError::Format(format!("invalid resolver config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.polling.validate()?;
        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 || rate_limit.burst_size == 0 {
                return Err(ValidationError::ConstraintViolation(
                    "rate limit values must be greater than 0".to_string(),
                ));
            }
        }
        if self.request_timeout.is_zero() {
            return Err(ValidationError::Field {
                field: "requestTimeout".to_string(),
                message: "Request timeout cannot be 0".to_string(),
            });
        }
        Ok(())
    }
}
