//! Standard Redfish client reached over the management network.

use crate::{
    BmcResult, ProtocolName,
    bmc::{BmcController, BmcOptions, ComputerSystem, PowerState, system_path},
    core::{domain::error::ClientBuildError, infrastructure::redfish_client::RedfishHttpClient},
};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

#[derive(Debug)]
pub struct RedfishBmc {
    options: BmcOptions,
    client: RedfishHttpClient,
}

impl RedfishBmc {
    /// Binds a client to the given options. No request is sent.
    ///
    /// # Errors
    /// Returns `ClientBuildError` if the HTTP transport cannot be set up.
    pub fn new(options: BmcOptions) -> Result<Self, ClientBuildError> {
        let client = RedfishHttpClient::new(
            options.endpoint.clone(),
            options.credentials.clone(),
            options.rate_limit,
            options.request_timeout,
            options.accept_invalid_certs,
        )?;
        Ok(Self { options, client })
    }

    async fn reset(&self, system_id: &str, reset_type: &str) -> BmcResult<()> {
        let path = format!("{}/Actions/ComputerSystem.Reset", system_path(system_id));
        debug!(
            "Resetting system {} on {} with {}",
            system_id, self.options.endpoint, reset_type
        );
        self.client
            .post(&path, &json!({ "ResetType": reset_type }))
            .await
    }
}

#[async_trait]
impl BmcController for RedfishBmc {
    fn protocol(&self) -> ProtocolName {
        ProtocolName::Redfish
    }

    fn options(&self) -> &BmcOptions {
        &self.options
    }

    async fn power_state(&self, system_id: &str) -> BmcResult<PowerState> {
        let system: ComputerSystem = self.client.get(&system_path(system_id)).await?;
        Ok(system.power_state)
    }

    async fn power_on(&self, system_id: &str) -> BmcResult<()> {
        self.reset(system_id, "On").await
    }

    async fn power_off(&self, system_id: &str) -> BmcResult<()> {
        self.reset(system_id, "ForceOff").await
    }
}
