use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A named, independently owned network address that BMC records can share.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Endpoint {
    pub name: String,
    pub spec: EndpointSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSpec {
    pub ip: IpAddr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            name: name.into(),
            spec: EndpointSpec {
                ip,
                mac_address: None,
            },
        }
    }
}
