use crate::core::domain::error::ValidationError;
use std::fmt;

/// A BMC account password (plaintext, kept only as long as the client lives).
#[derive(Clone, PartialEq, Eq)]
pub struct BmcPassword(String);

impl BmcPassword {
    /// Creates a new validated password.
    pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
        let password = password.into();
        validate_password(&password)?;
        Ok(Self(password))
    }

    /// Creates a new password without validation.
    pub(crate) fn new_unchecked(password: String) -> Self {
        Self(password)
    }

    /// Returns the password as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BmcPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BmcPassword(REDACTED)")
    }
}

/// Validates a password.
pub(crate) fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Field {
            field: "password".to_string(),
            message: "Password cannot be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password() {
        assert!(validate_password("calvin").is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = BmcPassword::new("hunter2").unwrap();
        let rendered = format!("{:?}", password);
        assert!(!rendered.contains("hunter2"));
        assert_eq!(password.as_str(), "hunter2");
    }
}
