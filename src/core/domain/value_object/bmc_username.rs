use crate::core::domain::error::ValidationError;

/// A BMC account username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmcUsername(String);

impl BmcUsername {
    /// Creates a new validated username.
    pub fn new(username: impl Into<String>) -> Result<Self, ValidationError> {
        let username = username.into();
        validate_username(&username)?;
        Ok(Self(username))
    }

    /// Creates a new username without validation.
    pub(crate) fn new_unchecked(username: String) -> Self {
        Self(username)
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a username.
///
/// BMC vendors disagree on allowed characters, so only emptiness is rejected.
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::Field {
            field: "username".to_string(),
            message: "Username cannot be empty".to_string(),
        });
    }
    Ok(())
}
