use crate::core::domain::{error::ValidationError, value_object::serde_helpers::duration_secs};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Polling cadence handed to every constructed BMC client.
///
/// The resolver never interprets these values; the client uses them for
/// its power-state and resource polling loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollingOptions {
    #[serde(with = "duration_secs")]
    pub power_polling_interval: Duration,
    #[serde(with = "duration_secs")]
    pub power_polling_timeout: Duration,
    #[serde(with = "duration_secs")]
    pub resource_polling_interval: Duration,
    #[serde(with = "duration_secs")]
    pub resource_polling_timeout: Duration,
}

impl Default for PollingOptions {
    fn default() -> Self {
        Self {
            power_polling_interval: Duration::from_secs(5),
            power_polling_timeout: Duration::from_secs(120),
            resource_polling_interval: Duration::from_secs(5),
            resource_polling_timeout: Duration::from_secs(120),
        }
    }
}

impl PollingOptions {
    /// Rejects zero polling intervals, which would turn a wait into a busy loop.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let intervals = [
            ("powerPollingInterval", self.power_polling_interval),
            ("resourcePollingInterval", self.resource_polling_interval),
        ];
        for (field, interval) in intervals {
            if interval.is_zero() {
                return Err(ValidationError::Field {
                    field: field.to_string(),
                    message: "Polling interval cannot be 0".to_string(),
                });
            }
        }
        Ok(())
    }
}
