//! BMC protocol descriptors.

use crate::core::domain::error::BmcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Protocol descriptor as stored on BMC and machine records.
///
/// The name is kept as found in the record so an unknown protocol can be
/// reported verbatim; it is parsed into the closed [`ProtocolName`] enum
/// only when a client is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Protocol {
    pub name: String,
    pub port: u16,
}

impl Protocol {
    pub fn new(name: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            port,
        }
    }
}

/// The supported Redfish flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolName {
    /// A Redfish service reached directly over the management network
    Redfish,
    /// A Redfish service on loopback or a local emulator
    RedfishLocal,
    /// A Redfish service whose side effects are mirrored into the cluster
    RedfishKube,
}

impl ProtocolName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolName::Redfish => "Redfish",
            ProtocolName::RedfishLocal => "RedfishLocal",
            ProtocolName::RedfishKube => "RedfishKube",
        }
    }
}

impl fmt::Display for ProtocolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolName {
    type Err = BmcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Redfish" => Ok(ProtocolName::Redfish),
            "RedfishLocal" | "Redfish-Local" => Ok(ProtocolName::RedfishLocal),
            "RedfishKube" | "Redfish-Kube" => Ok(ProtocolName::RedfishKube),
            other => Err(BmcError::UnsupportedProtocol(other.to_string())),
        }
    }
}
