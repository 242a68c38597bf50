use crate::{
    BmcError, BmcResult, ResourceStore,
    core::domain::{
        error::{ResourceKind, StoreError},
        model::{
            bmc::{Bmc, EndpointSource},
            machine::{BmcSource, Machine},
            object_ref::ObjectRef,
            protocol::Protocol,
        },
    },
};
use std::sync::Arc;
use tracing::{debug, warn};

/// The BMC access parameters of a machine or BMC record, minus credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBmc {
    /// Management network address, without scheme or port
    pub address: String,
    pub protocol: Protocol,
    pub secret_ref: ObjectRef,
}

/// Determines where a BMC lives, following endpoint and BMC references.
pub struct EndpointResolver {
    store: Arc<dyn ResourceStore>,
}

impl EndpointResolver {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    /// Resolves a machine's BMC, through its BMC reference or its inline BMC.
    ///
    /// # Errors
    /// * `BmcError::NoBmcConfigured` if the machine has neither
    /// * `BmcError::Lookup` if a referenced record cannot be fetched
    pub async fn resolve_machine(&self, machine: &Machine) -> BmcResult<ResolvedBmc> {
        match machine.spec.bmc_source() {
            Some(BmcSource::Reference(reference)) => {
                debug!("Machine {} uses BMC {}", machine.name, reference.name);
                let bmc = self
                    .store
                    .get_bmc(&reference.name)
                    .await
                    .map_err(lookup_error(ResourceKind::Bmc, &reference.name))?;
                self.resolve_bmc(&bmc).await
            }
            Some(BmcSource::Inline(inline)) => {
                debug!("Machine {} has an inline BMC at {}", machine.name, inline.address);
                Ok(ResolvedBmc {
                    address: inline.address.clone(),
                    protocol: inline.protocol.clone(),
                    secret_ref: inline.bmc_secret_ref.clone(),
                })
            }
            None => Err(BmcError::NoBmcConfigured(machine.name.clone())),
        }
    }

    /// Resolves a standalone BMC record.
    pub async fn resolve_bmc(&self, bmc: &Bmc) -> BmcResult<ResolvedBmc> {
        let address = self.resolve_bmc_address(bmc).await?;
        Ok(ResolvedBmc {
            address,
            protocol: bmc.spec.protocol.clone(),
            secret_ref: bmc.spec.bmc_secret_ref.clone(),
        })
    }

    /// Returns the management address of a BMC.
    ///
    /// An endpoint reference is always fetched first; an inline endpoint, if
    /// also present, then overrides the fetched address.
    ///
    /// # Errors
    /// * `BmcError::Lookup` if the referenced endpoint cannot be fetched
    /// * `BmcError::NoEndpointConfigured` if the BMC has neither source
    pub async fn resolve_bmc_address(&self, bmc: &Bmc) -> BmcResult<String> {
        let referenced = match &bmc.spec.endpoint_ref {
            Some(reference) => {
                let endpoint = self
                    .store
                    .get_endpoint(&reference.name)
                    .await
                    .map_err(lookup_error(ResourceKind::Endpoint, &reference.name))?;
                Some(endpoint.spec.ip)
            }
            None => None,
        };

        match bmc.spec.endpoint_source() {
            Some(EndpointSource::Inline(ip)) => {
                if let Some(overridden) = referenced {
                    warn!(
                        "BMC {} sets both an endpoint and an endpoint reference, using {} over {}",
                        bmc.name, ip, overridden
                    );
                }
                Ok(ip.to_string())
            }
            Some(EndpointSource::Reference(_)) | None => referenced
                .map(|ip| ip.to_string())
                .ok_or_else(|| BmcError::NoEndpointConfigured(bmc.name.clone())),
        }
    }
}

pub(crate) fn lookup_error(kind: ResourceKind, name: &str) -> impl FnOnce(StoreError) -> BmcError {
    let name = name.to_string();
    move |source| BmcError::Lookup { kind, name, source }
}
