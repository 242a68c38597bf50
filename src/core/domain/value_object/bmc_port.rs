use crate::core::domain::error::ValidationError;

/// A validated BMC port number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmcPort(u16);

impl BmcPort {
    /// Creates a new validated port.
    pub fn new(port: u16) -> Result<Self, ValidationError> {
        validate_port(port)?;
        Ok(Self(port))
    }

    /// Returns the port number.
    pub fn get(&self) -> u16 {
        self.0
    }
}

/// Validates a port number.
pub(crate) fn validate_port(port: u16) -> Result<(), ValidationError> {
    if port == 0 {
        return Err(ValidationError::Field {
            field: "port".to_string(),
            message: "Port cannot be 0".to_string(),
        });
    }
    // All ports 1-65535 are valid.
    Ok(())
}
