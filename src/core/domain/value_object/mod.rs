mod bmc_address;
mod bmc_endpoint_url;
mod bmc_password;
mod bmc_port;
mod bmc_username;
pub mod serde_helpers;

pub use bmc_address::BmcAddress;
pub use bmc_endpoint_url::BmcEndpointUrl;
pub use bmc_password::BmcPassword;
pub use bmc_port::BmcPort;
pub use bmc_username::BmcUsername;

// Re-export validation functions for internal use
pub(crate) use bmc_password::validate_password;
pub(crate) use bmc_username::validate_username;
