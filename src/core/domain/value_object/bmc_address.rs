use crate::core::domain::error::ValidationError;
use std::fmt;
use std::net::IpAddr;

const MAX_HOSTNAME_LENGTH: usize = 253;
// URL delimiters that would change how the origin is parsed.
const FORBIDDEN_HOST_CHARS: &[char] = &[':', '/', '?', '#', '@', '[', ']', '\\'];

/// The network address of a BMC: an IP literal or a hostname.
///
/// No DNS resolution happens here; an unreachable BMC is the transport
/// client's problem, not the resolver's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmcAddress(String);

impl BmcAddress {
    /// Creates a new validated address.
    pub fn new(address: impl Into<String>) -> Result<Self, ValidationError> {
        let address = address.into();
        validate_address(&address)?;
        Ok(Self(address))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the address formatted for use as the host part of a URL.
    ///
    /// IPv6 literals are wrapped in brackets.
    pub fn url_host(&self) -> String {
        match self.0.parse::<IpAddr>() {
            Ok(IpAddr::V6(v6)) => format!("[{v6}]"),
            _ => self.0.clone(),
        }
    }
}

impl fmt::Display for BmcAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates a BMC address.
///
/// Hostnames are not held to RFC 1035: vendor-assigned names with
/// underscores and fully qualified names with a trailing dot are accepted.
pub(crate) fn validate_address(address: &str) -> Result<(), ValidationError> {
    if address.is_empty() {
        return Err(ValidationError::Field {
            field: "address".to_string(),
            message: "Address cannot be empty".to_string(),
        });
    }

    if address.parse::<IpAddr>().is_ok() {
        return Ok(());
    }

    if address.len() > MAX_HOSTNAME_LENGTH {
        return Err(ValidationError::ConstraintViolation(format!(
            "Address length exceeds maximum of {} characters",
            MAX_HOSTNAME_LENGTH
        )));
    }

    if address.chars().any(char::is_whitespace) {
        return Err(ValidationError::Format(
            "Address cannot contain whitespace".to_string(),
        ));
    }

    if let Some(c) = address.chars().find(|c| FORBIDDEN_HOST_CHARS.contains(c)) {
        return Err(ValidationError::Format(format!(
            "Address cannot contain '{}' unless it is an IP literal",
            c
        )));
    }

    Ok(())
}
