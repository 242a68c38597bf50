//! Redfish client for emulated BMCs running inside the cluster.
//!
//! Power handling is that of [`RedfishLocalBmc`]; in addition the client
//! keeps a handle to the resource store and the namespace it operates in,
//! so it can look up the records that mirror the systems it manages.

use crate::{
    BmcResult, ProtocolName, ResourceStore,
    bmc::{BmcController, BmcOptions, PowerState, RedfishLocalBmc},
    core::domain::{
        error::{ClientBuildError, ResourceKind},
        model::{
            bmc::{Bmc, system_name_for_bmc},
            machine::Machine,
        },
    },
    resolver::application::service::endpoint_resolver::lookup_error,
};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub struct RedfishKubeBmc {
    local: RedfishLocalBmc,
    store: Arc<dyn ResourceStore>,
    namespace: String,
}

impl RedfishKubeBmc {
    /// Binds a client to the given options, store and namespace. No request is sent.
    ///
    /// # Errors
    /// Returns `ClientBuildError` if the HTTP transport cannot be set up or
    /// the namespace is empty.
    pub fn new(
        options: BmcOptions,
        store: Arc<dyn ResourceStore>,
        namespace: impl Into<String>,
    ) -> Result<Self, ClientBuildError> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(ClientBuildError::InvalidOptions(
                "namespace cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            local: RedfishLocalBmc::new(options)?,
            store,
            namespace,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    /// Fetches the machine record that mirrors the `index`-th system behind `bmc`.
    ///
    /// Records are keyed by name alone: the store is cluster-scoped, and the
    /// namespace only tells the emulator where its own objects live. A
    /// machine is found the same way whatever namespace the client holds.
    pub async fn machine_for_system(&self, bmc: &Bmc, index: usize) -> BmcResult<Machine> {
        let name = system_name_for_bmc(bmc, index);
        debug!("Looking up machine {} in namespace {}", name, self.namespace);
        self.store
            .get_machine(&name)
            .await
            .map_err(lookup_error(ResourceKind::Machine, &name))
    }
}

impl fmt::Debug for RedfishKubeBmc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedfishKubeBmc")
            .field("local", &self.local)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl BmcController for RedfishKubeBmc {
    fn protocol(&self) -> ProtocolName {
        ProtocolName::RedfishKube
    }

    fn options(&self) -> &BmcOptions {
        self.local.options()
    }

    async fn power_state(&self, system_id: &str) -> BmcResult<PowerState> {
        self.local.power_state(system_id).await
    }

    async fn power_on(&self, system_id: &str) -> BmcResult<()> {
        self.local.power_on(system_id).await
    }

    async fn power_off(&self, system_id: &str) -> BmcResult<()> {
        self.local.power_off(system_id).await
    }
}
