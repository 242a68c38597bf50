//! Redfish client for loopback and emulated BMCs.
//!
//! Emulators do not implement reset actions, so power changes are written
//! directly to the system's `PowerState`. Certificate verification is off;
//! local emulators serve self-signed certificates.

use crate::{
    BmcResult, ProtocolName,
    bmc::{BmcController, BmcOptions, ComputerSystem, PowerState, system_path},
    core::{domain::error::ClientBuildError, infrastructure::redfish_client::RedfishHttpClient},
};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct RedfishLocalBmc {
    options: BmcOptions,
    client: RedfishHttpClient,
}

impl RedfishLocalBmc {
    /// Binds a client to the given options. No request is sent.
    ///
    /// Certificate verification is always disabled, whatever
    /// `options.accept_invalid_certs` says; overriding a `false` is logged.
    ///
    /// # Errors
    /// Returns `ClientBuildError` if the HTTP transport cannot be set up.
    pub fn new(mut options: BmcOptions) -> Result<Self, ClientBuildError> {
        if !options.accept_invalid_certs {
            warn!(
                "Disabling certificate verification for local Redfish BMC {}",
                options.endpoint
            );
            options.accept_invalid_certs = true;
        }
        let client = RedfishHttpClient::new(
            options.endpoint.clone(),
            options.credentials.clone(),
            options.rate_limit,
            options.request_timeout,
            options.accept_invalid_certs,
        )?;
        Ok(Self { options, client })
    }

    async fn set_power_state(&self, system_id: &str, state: PowerState) -> BmcResult<()> {
        debug!(
            "Setting power state of system {} on {} to {}",
            system_id, self.options.endpoint, state
        );
        self.client
            .patch(&system_path(system_id), &json!({ "PowerState": state.to_string() }))
            .await
    }
}

#[async_trait]
impl BmcController for RedfishLocalBmc {
    fn protocol(&self) -> ProtocolName {
        ProtocolName::RedfishLocal
    }

    fn options(&self) -> &BmcOptions {
        &self.options
    }

    async fn power_state(&self, system_id: &str) -> BmcResult<PowerState> {
        let system: ComputerSystem = self.client.get(&system_path(system_id)).await?;
        Ok(system.power_state)
    }

    async fn power_on(&self, system_id: &str) -> BmcResult<()> {
        self.set_power_state(system_id, PowerState::On).await
    }

    async fn power_off(&self, system_id: &str) -> BmcResult<()> {
        self.set_power_state(system_id, PowerState::Off).await
    }
}
