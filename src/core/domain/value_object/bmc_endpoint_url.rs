use crate::core::domain::{
    error::ValidationError,
    value_object::{bmc_address::BmcAddress, bmc_port::BmcPort},
};
use std::fmt;

/// The origin (`scheme://host:port`) a BMC client talks to.
///
/// The string is kept exactly as built; `url::Url` is only used to check
/// it, since it would drop default ports and append a trailing slash.
///
/// # Examples
///
/// ```
/// use metal_bmc::{BmcAddress, BmcEndpointUrl, BmcPort};
///
/// let address = BmcAddress::new("10.0.0.5").unwrap();
/// let port = BmcPort::new(443).unwrap();
///
/// let url = BmcEndpointUrl::new(&address, &port, false).unwrap();
/// assert_eq!(url.as_str(), "https://10.0.0.5:443");
///
/// let url = BmcEndpointUrl::new(&address, &port, true).unwrap();
/// assert_eq!(url.as_str(), "http://10.0.0.5:443");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmcEndpointUrl(String);

impl BmcEndpointUrl {
    /// Joins scheme, host and port into an origin; `insecure` selects plain HTTP.
    pub fn new(
        address: &BmcAddress,
        port: &BmcPort,
        insecure: bool,
    ) -> Result<Self, ValidationError> {
        let scheme = if insecure { "http" } else { "https" };
        let url = format!("{}://{}:{}", scheme, address.url_host(), port.get());
        validate_url(&url)?;
        Ok(Self(url))
    }

    /// Creates a new URL without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(url: String) -> Self {
        Self(url.trim_end_matches('/').to_string())
    }

    /// Returns the origin as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the scheme part of the origin.
    pub fn scheme(&self) -> &str {
        self.0.split("://").next().unwrap_or_default()
    }

    /// Appends an absolute path to the origin.
    pub fn with_path(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl fmt::Display for BmcEndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates an origin URL.
pub(crate) fn validate_url(url: &str) -> Result<(), ValidationError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::ConstraintViolation(
            "Invalid scheme. Must be one of: https, http".to_string(),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL has no host".to_string(),
        });
    }

    Ok(())
}
