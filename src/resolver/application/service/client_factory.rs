use crate::{
    BmcError, BmcResult, PollingOptions, RateLimitConfig, ResolverConfig, ResourceStore,
    bmc::{BmcClient, BmcOptions, RedfishBmc, RedfishKubeBmc, RedfishLocalBmc},
    core::domain::{
        error::{ClientBuildError, ValidationError},
        model::{bmc_credentials::BmcCredentials, bmc_secret::BmcSecret, protocol::ProtocolName},
        value_object::{BmcAddress, BmcEndpointUrl, BmcPort},
    },
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Namespace handed to in-cluster (`RedfishKube`) clients.
pub const DEFAULT_KUBE_NAMESPACE: &str = "default";

/// Selects and constructs the client for a protocol.
///
/// Nothing is cached: every call builds a fresh, independently owned client.
pub struct ClientFactory {
    store: Arc<dyn ResourceStore>,
    accept_invalid_certs: bool,
    rate_limit: Option<RateLimitConfig>,
    request_timeout: Duration,
}

impl ClientFactory {
    pub fn new(store: Arc<dyn ResourceStore>, config: &ResolverConfig) -> Self {
        Self {
            store,
            accept_invalid_certs: config.accept_invalid_certs,
            rate_limit: config.rate_limit,
            request_timeout: config.request_timeout,
        }
    }

    /// Builds a client for `protocol` bound to `address:port` and the secret's credentials.
    ///
    /// The protocol is checked before anything else, so an unsupported
    /// protocol never reads the secret. Credentials are extracted before
    /// the origin is built.
    ///
    /// # Errors
    /// * `BmcError::UnsupportedProtocol` for an unknown protocol name
    /// * `BmcError::Credentials` if the secret lacks usable credentials
    /// * `BmcError::ClientConstruction` if the address or port cannot form an
    ///   origin, a polling interval is zero, or the transport cannot be set up
    pub fn create_client(
        &self,
        protocol: &str,
        address: &str,
        port: u16,
        secret: &BmcSecret,
        insecure: bool,
        polling: &PollingOptions,
    ) -> BmcResult<BmcClient> {
        let protocol: ProtocolName = protocol.parse()?;

        let client = match protocol {
            ProtocolName::Redfish => {
                let options = self.options(protocol, address, port, secret, insecure, polling)?;
                RedfishBmc::new(options)
                    .map(BmcClient::Redfish)
                    .map_err(construction_error(protocol))?
            }
            ProtocolName::RedfishLocal => {
                let options = self.options(protocol, address, port, secret, insecure, polling)?;
                RedfishLocalBmc::new(options)
                    .map(BmcClient::RedfishLocal)
                    .map_err(construction_error(protocol))?
            }
            ProtocolName::RedfishKube => {
                let options = self.options(protocol, address, port, secret, insecure, polling)?;
                RedfishKubeBmc::new(options, Arc::clone(&self.store), DEFAULT_KUBE_NAMESPACE)
                    .map(BmcClient::RedfishKube)
                    .map_err(construction_error(protocol))?
            }
        };

        debug!("Created {} client for {}", protocol, address);
        Ok(client)
    }

    fn options(
        &self,
        protocol: ProtocolName,
        address: &str,
        port: u16,
        secret: &BmcSecret,
        insecure: bool,
        polling: &PollingOptions,
    ) -> BmcResult<BmcOptions> {
        let credentials = BmcCredentials::from_secret(secret)
            .map_err(|source| BmcError::Credentials { protocol, source })?;

        let endpoint = endpoint_url(address, port, insecure)
            .map_err(ClientBuildError::from)
            .map_err(construction_error(protocol))?;
        polling
            .validate()
            .map_err(|e| ClientBuildError::InvalidOptions(e.to_string()))
            .map_err(construction_error(protocol))?;

        Ok(BmcOptions {
            endpoint,
            credentials,
            polling: *polling,
            rate_limit: self.rate_limit,
            request_timeout: self.request_timeout,
            accept_invalid_certs: self.accept_invalid_certs,
        })
    }
}

fn endpoint_url(
    address: &str,
    port: u16,
    insecure: bool,
) -> Result<BmcEndpointUrl, ValidationError> {
    let address = BmcAddress::new(address)?;
    let port = BmcPort::new(port)?;
    BmcEndpointUrl::new(&address, &port, insecure)
}

fn construction_error(protocol: ProtocolName) -> impl FnOnce(ClientBuildError) -> BmcError {
    move |source| BmcError::ClientConstruction { protocol, source }
}
