//! Username/password extraction from BMC secrets.

use crate::core::domain::{
    error::{CredentialError, CredentialField},
    model::bmc_secret::BmcSecret,
    value_object::{BmcPassword, BmcUsername, validate_password, validate_username},
};

/// Basic-auth credentials for a BMC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmcCredentials {
    username: BmcUsername,
    password: BmcPassword,
}

impl BmcCredentials {
    pub fn new(username: BmcUsername, password: BmcPassword) -> Self {
        Self { username, password }
    }

    /// Extracts credentials from the `username` and `password` keys of a secret.
    ///
    /// The username is checked first, so a secret missing both keys reports
    /// the username.
    ///
    /// # Errors
    /// Returns `CredentialError` naming the first field that is missing,
    /// empty, or not valid UTF-8.
    pub fn from_secret(secret: &BmcSecret) -> Result<Self, CredentialError> {
        let username = read_field(secret, CredentialField::Username)?;
        validate_username(&username)
            .map_err(|_| CredentialError::Empty(CredentialField::Username))?;

        let password = read_field(secret, CredentialField::Password)?;
        validate_password(&password)
            .map_err(|_| CredentialError::Empty(CredentialField::Password))?;

        Ok(Self {
            username: BmcUsername::new_unchecked(username),
            password: BmcPassword::new_unchecked(password),
        })
    }

    pub fn username(&self) -> &BmcUsername {
        &self.username
    }

    pub fn password(&self) -> &BmcPassword {
        &self.password
    }
}

fn read_field(secret: &BmcSecret, field: CredentialField) -> Result<String, CredentialError> {
    let bytes = secret
        .data
        .get(field.key())
        .ok_or(CredentialError::MissingField(field))?;
    String::from_utf8(bytes.clone()).map_err(|_| CredentialError::InvalidEncoding(field))
}
