use crate::{
    PollingOptions, RateLimitConfig,
    core::domain::{model::bmc_credentials::BmcCredentials, value_object::BmcEndpointUrl},
};
use std::time::Duration;

/// Everything a BMC client is bound to at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmcOptions {
    pub endpoint: BmcEndpointUrl,
    pub credentials: BmcCredentials,
    pub polling: PollingOptions,
    pub rate_limit: Option<RateLimitConfig>,
    pub request_timeout: Duration,
    pub accept_invalid_certs: bool,
}
