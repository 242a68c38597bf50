//! Resolves the Redfish client needed to operate a bare-metal machine's BMC.
//!
//! A machine record either references a standalone BMC record or carries
//! its BMC configuration inline; a BMC record holds its address inline or
//! through a shared endpoint record. [`BmcResolver`] follows those
//! references through a [`ResourceStore`], reads the credentials from the
//! BMC secret, and hands back a [`BmcClient`] bound to the BMC's origin,
//! credentials and polling options.

mod bmc;
mod config;
mod core;
mod resolver;

pub use crate::bmc::{
    BmcClient, BmcController, BmcOptions, PowerState, RedfishBmc, RedfishKubeBmc, RedfishLocalBmc,
};
pub use crate::config::{RateLimitConfig, ResolverConfig};
pub use crate::core::domain::error::{
    BmcError, BmcResult, ClientBuildError, CredentialError, CredentialField, ResourceKind,
    StoreError, ValidationError,
};
pub use crate::core::domain::model::{
    bmc::{Bmc, BmcSpec, EndpointSource, InlineEndpoint, system_name_for_bmc},
    bmc_credentials::BmcCredentials,
    bmc_secret::{BmcSecret, PASSWORD_KEY, USERNAME_KEY},
    endpoint::{Endpoint, EndpointSpec},
    machine::{BmcSource, InlineBmc, Machine, MachineSpec},
    object_ref::ObjectRef,
    polling::PollingOptions,
    protocol::{Protocol, ProtocolName},
};
pub use crate::core::domain::value_object::{
    BmcAddress, BmcEndpointUrl, BmcPassword, BmcPort, BmcUsername,
};
pub use crate::core::infrastructure::resource_store::{InMemoryResourceStore, ResourceStore};
pub use crate::resolver::application::service::{
    client_factory::{ClientFactory, DEFAULT_KUBE_NAMESPACE},
    endpoint_resolver::{EndpointResolver, ResolvedBmc},
};

use crate::resolver::application::service::endpoint_resolver::lookup_error;
use std::sync::Arc;
use tracing::debug;

/// Resolves machine and BMC records into ready-to-use BMC clients.
///
/// The resolver keeps no state between calls; it may be shared freely
/// across tasks and every call returns a new client.
///
/// # Examples
///
/// ```no_run
/// use metal_bmc::{BmcController, BmcResolver, BmcResult, InMemoryResourceStore, Machine, Protocol};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> BmcResult<()> {
///     let store = Arc::new(InMemoryResourceStore::new());
///     let resolver = BmcResolver::builder().store(store).insecure(false).build()?;
///
///     let machine = Machine::with_inline_bmc(
///         "server-1",
///         "10.0.0.5",
///         Protocol::new("Redfish", 443),
///         "server-1-bmc-secret",
///     );
///     let client = resolver.client_for_machine(&machine).await?;
///     println!("Power state: {}", client.power_state("1").await?);
///     Ok(())
/// }
/// ```
pub struct BmcResolver {
    store: Arc<dyn ResourceStore>,
    config: ResolverConfig,
    endpoints: EndpointResolver,
    factory: ClientFactory,
}

/// Builder for BmcResolver configuration
#[derive(Default)]
pub struct BmcResolverBuilder {
    store: Option<Arc<dyn ResourceStore>>,
    config: ResolverConfig,
}

impl BmcResolverBuilder {
    pub fn store(mut self, store: Arc<dyn ResourceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.config.insecure = insecure;
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    pub fn polling(mut self, polling: PollingOptions) -> Self {
        self.config.polling = polling;
        self
    }

    pub fn rate_limit(mut self, requests_per_second: u32, burst_size: u32) -> Self {
        self.config.rate_limit = Some(RateLimitConfig {
            requests_per_second,
            burst_size,
        });
        self
    }

    pub fn build(self) -> BmcResult<BmcResolver> {
        let store = self.store.ok_or_else(|| ValidationError::Field {
            field: "store".to_string(),
            message: "Resource store is required".to_string(),
        })?;
        self.config.validate()?;

        Ok(BmcResolver {
            endpoints: EndpointResolver::new(Arc::clone(&store)),
            factory: ClientFactory::new(Arc::clone(&store), &self.config),
            store,
            config: self.config,
        })
    }
}

impl BmcResolver {
    /// Creates a new builder for BmcResolver configuration
    pub fn builder() -> BmcResolverBuilder {
        BmcResolverBuilder::default()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Builds the client for a machine's BMC.
    ///
    /// A BMC reference takes precedence over an inline BMC.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The machine has neither a BMC reference nor an inline BMC
    /// - A referenced BMC, endpoint or secret cannot be fetched
    /// - The protocol is not supported
    /// - The secret lacks a username or password
    /// - The client cannot be constructed
    pub async fn client_for_machine(&self, machine: &Machine) -> BmcResult<BmcClient> {
        debug!("Resolving BMC client for machine {}", machine.name);
        let resolved = self.endpoints.resolve_machine(machine).await?;
        self.client_for_resolved(&resolved).await
    }

    /// Fetches a machine record by name and builds the client for its BMC.
    pub async fn client_for_machine_name(&self, name: &str) -> BmcResult<BmcClient> {
        let machine = self
            .store
            .get_machine(name)
            .await
            .map_err(lookup_error(ResourceKind::Machine, name))?;
        self.client_for_machine(&machine).await
    }

    /// Builds the client for a standalone BMC record.
    ///
    /// An inline endpoint takes precedence over an endpoint reference.
    pub async fn client_for_bmc(&self, bmc: &Bmc) -> BmcResult<BmcClient> {
        debug!("Resolving BMC client for BMC {}", bmc.name);
        let resolved = self.endpoints.resolve_bmc(bmc).await?;
        self.client_for_resolved(&resolved).await
    }

    /// Builds a client from explicit parameters, bypassing record resolution.
    pub fn create_client(
        &self,
        protocol: &str,
        address: &str,
        port: u16,
        secret: &BmcSecret,
        insecure: bool,
        polling: &PollingOptions,
    ) -> BmcResult<BmcClient> {
        self.factory
            .create_client(protocol, address, port, secret, insecure, polling)
    }

    // The secret is fetched before the protocol is checked.
    async fn client_for_resolved(&self, resolved: &ResolvedBmc) -> BmcResult<BmcClient> {
        let secret_name = &resolved.secret_ref.name;
        let secret = self
            .store
            .get_bmc_secret(secret_name)
            .await
            .map_err(lookup_error(ResourceKind::BmcSecret, secret_name))?;

        self.factory.create_client(
            &resolved.protocol.name,
            &resolved.address,
            resolved.protocol.port,
            &secret,
            self.config.insecure,
            &self.config.polling,
        )
    }
}

#[cfg(test)]
mod tests;
