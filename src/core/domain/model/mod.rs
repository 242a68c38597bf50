pub mod bmc;
pub mod bmc_credentials;
pub mod bmc_secret;
pub mod endpoint;
pub mod machine;
pub mod object_ref;
pub mod polling;
pub mod protocol;
