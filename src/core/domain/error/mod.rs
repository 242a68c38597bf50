use crate::core::domain::model::protocol::ProtocolName;
use std::fmt;
use thiserror::Error;

/// The main error type for BMC client resolution.
///
/// This enum represents all possible errors that can occur while
/// resolving a machine's BMC into a usable client, including store
/// lookups, configuration shape problems, credential extraction and
/// client construction, plus runtime failures of the constructed client.
#[derive(Error, Debug)]
pub enum BmcError {
    /// A record could not be fetched from the resource store
    ///
    /// # Fields
    /// * `kind` - The kind of record that was looked up
    /// * `name` - The exact name used for the lookup
    /// * `source` - The store failure, surfaced verbatim
    #[error("failed to get {kind} '{name}': {source}")]
    Lookup {
        kind: ResourceKind,
        name: String,
        #[source]
        source: StoreError,
    },

    /// The machine carries neither a BMC reference nor an inline BMC
    ///
    /// # Fields
    /// * `0` - The machine name
    #[error("machine {0} has neither a BMC reference nor a BMC configured")]
    NoBmcConfigured(String),

    /// The BMC carries neither an inline endpoint nor an endpoint reference
    ///
    /// # Fields
    /// * `0` - The BMC name
    #[error("BMC {0} has neither an endpoint nor an endpoint reference configured")]
    NoEndpointConfigured(String),

    /// The protocol name does not match any supported client
    ///
    /// # Fields
    /// * `0` - The protocol name as found in the record
    #[error("unsupported BMC protocol {0}")]
    UnsupportedProtocol(String),

    /// The BMC secret did not yield usable credentials
    #[error("failed to get credentials from BMC secret for {protocol} client: {source}")]
    Credentials {
        protocol: ProtocolName,
        #[source]
        source: CredentialError,
    },

    /// The transport client could not be constructed
    #[error("failed to create {protocol} client: {source}")]
    ClientConstruction {
        protocol: ProtocolName,
        #[source]
        source: ClientBuildError,
    },

    /// Represents validation failures of addresses, ports and configuration
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A request issued by a constructed client failed
    ///
    /// # Fields
    /// * `0` - A description of what went wrong
    #[error("Connection error: {0}")]
    Connection(String),

    /// A polling loop of a constructed client ran out of time
    ///
    /// # Fields
    /// * `0` - What was being waited for
    #[error("timed out waiting for {0}")]
    Timeout(String),
}

/// Failures reported by a [`ResourceStore`](crate::ResourceStore) lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record of that kind exists under the given name
    #[error("{kind} '{name}' not found")]
    NotFound { kind: ResourceKind, name: String },

    /// The store could not be reached or answered with an error
    #[error("resource store unavailable: {0}")]
    Unavailable(String),
}

/// Failures while extracting a username/password pair from a BMC secret.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// A required key is absent from the secret data
    #[error("no {0} found in the BMC secret")]
    MissingField(CredentialField),

    /// A required key is present but its value is empty
    #[error("the {0} in the BMC secret is empty")]
    Empty(CredentialField),

    /// A required key holds bytes that are not valid UTF-8
    #[error("the {0} in the BMC secret is not valid UTF-8")]
    InvalidEncoding(CredentialField),
}

/// Failures while building a transport client from resolved parameters.
#[derive(Error, Debug)]
pub enum ClientBuildError {
    /// The HTTP client could not be set up
    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The client options are not usable
    #[error("invalid client options: {0}")]
    InvalidOptions(String),

    /// The address or port cannot form a usable origin
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] ValidationError),
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// The kinds of records held by the resource store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Machine,
    Bmc,
    Endpoint,
    BmcSecret,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Machine => write!(f, "machine"),
            ResourceKind::Bmc => write!(f, "BMC"),
            ResourceKind::Endpoint => write!(f, "endpoint"),
            ResourceKind::BmcSecret => write!(f, "BMC secret"),
        }
    }
}

/// The two keys a BMC secret must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Username,
    Password,
}

impl CredentialField {
    /// Returns the secret data key holding this field.
    pub fn key(&self) -> &'static str {
        match self {
            CredentialField::Username => "username",
            CredentialField::Password => "password",
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Type alias for Results that may fail with a BmcError
pub type BmcResult<T> = Result<T, BmcError>;
