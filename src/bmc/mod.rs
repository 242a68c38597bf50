//! BMC client handles produced by the resolver.
//!
//! Every variant is already bound to an origin, basic-auth credentials and
//! polling options when it is handed out; constructing one sends no request.

mod options;
mod redfish;
mod redfish_kube;
mod redfish_local;

pub use options::BmcOptions;
pub use redfish::RedfishBmc;
pub use redfish_kube::RedfishKubeBmc;
pub use redfish_local::RedfishLocalBmc;

use crate::{BmcError, BmcResult, ProtocolName, core::domain::value_object::BmcEndpointUrl};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

/// Operations every BMC client supports.
#[async_trait]
pub trait BmcController: Send + Sync {
    /// The protocol flavour this client speaks
    fn protocol(&self) -> ProtocolName;

    /// The options the client was constructed with
    fn options(&self) -> &BmcOptions;

    /// The origin the client talks to
    fn endpoint(&self) -> &BmcEndpointUrl {
        &self.options().endpoint
    }

    /// Reads the current power state of a system
    async fn power_state(&self, system_id: &str) -> BmcResult<PowerState>;

    /// Requests the system to power on
    async fn power_on(&self, system_id: &str) -> BmcResult<()>;

    /// Requests the system to power off (hard)
    async fn power_off(&self, system_id: &str) -> BmcResult<()>;

    /// Polls the power state until it matches `target`.
    ///
    /// Uses the power polling interval and timeout from the client options.
    async fn wait_for_power_state(&self, system_id: &str, target: PowerState) -> BmcResult<()> {
        let polling = self.options().polling;
        let poll = async {
            loop {
                if self.power_state(system_id).await? == target {
                    return Ok::<(), BmcError>(());
                }
                tokio::time::sleep(polling.power_polling_interval).await;
            }
        };

        match tokio::time::timeout(polling.power_polling_timeout, poll).await {
            Ok(result) => result,
            Err(_) => Err(BmcError::Timeout(format!(
                "system {} to reach power state {}",
                system_id, target
            ))),
        }
    }
}

/// Power state as reported by Redfish `ComputerSystem.PowerState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PowerState {
    On,
    Off,
    PoweringOn,
    PoweringOff,
    Paused,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerState::On => write!(f, "On"),
            PowerState::Off => write!(f, "Off"),
            PowerState::PoweringOn => write!(f, "PoweringOn"),
            PowerState::PoweringOff => write!(f, "PoweringOff"),
            PowerState::Paused => write!(f, "Paused"),
            PowerState::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComputerSystem {
    #[serde(rename = "PowerState", default = "unknown_power_state")]
    pub(crate) power_state: PowerState,
}

fn unknown_power_state() -> PowerState {
    PowerState::Unknown
}

pub(crate) fn system_path(system_id: &str) -> String {
    format!("/redfish/v1/Systems/{}", system_id)
}

/// A constructed BMC client, one variant per supported protocol.
#[derive(Debug)]
pub enum BmcClient {
    Redfish(RedfishBmc),
    RedfishLocal(RedfishLocalBmc),
    RedfishKube(RedfishKubeBmc),
}

impl BmcClient {
    fn inner(&self) -> &dyn BmcController {
        match self {
            BmcClient::Redfish(client) => client,
            BmcClient::RedfishLocal(client) => client,
            BmcClient::RedfishKube(client) => client,
        }
    }
}

#[async_trait]
impl BmcController for BmcClient {
    fn protocol(&self) -> ProtocolName {
        self.inner().protocol()
    }

    fn options(&self) -> &BmcOptions {
        self.inner().options()
    }

    async fn power_state(&self, system_id: &str) -> BmcResult<PowerState> {
        self.inner().power_state(system_id).await
    }

    async fn power_on(&self, system_id: &str) -> BmcResult<()> {
        self.inner().power_on(system_id).await
    }

    async fn power_off(&self, system_id: &str) -> BmcResult<()> {
        self.inner().power_off(system_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_state_from_redfish() {
        let system: ComputerSystem =
            serde_json::from_value(serde_json::json!({"PowerState": "PoweringOn"})).unwrap();
        assert_eq!(system.power_state, PowerState::PoweringOn);

        let system: ComputerSystem =
            serde_json::from_value(serde_json::json!({"PowerState": "Standby"})).unwrap();
        assert_eq!(system.power_state, PowerState::Unknown);

        let system: ComputerSystem = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(system.power_state, PowerState::Unknown);
    }
}
