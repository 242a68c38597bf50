use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Secret data key holding the BMC username.
pub const USERNAME_KEY: &str = "username";
/// Secret data key holding the BMC password.
pub const PASSWORD_KEY: &str = "password";

/// An opaque key/value secret holding BMC access credentials.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BmcSecret {
    pub name: String,
    #[serde(default)]
    pub data: BTreeMap<String, Vec<u8>>,
}

impl BmcSecret {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: BTreeMap::new(),
        }
    }

    /// Adds a key to the secret data.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Builds a secret carrying both required keys.
    pub fn with_credentials(
        name: impl Into<String>,
        username: impl Into<Vec<u8>>,
        password: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(name)
            .with_data(USERNAME_KEY, username)
            .with_data(PASSWORD_KEY, password)
    }
}

impl std::fmt::Debug for BmcSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BmcSecret")
            .field("name", &self.name)
            .field("keys", &self.data.keys().collect::<Vec<_>>())
            .finish()
    }
}
