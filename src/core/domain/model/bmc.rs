//! Standalone BMC records.

use crate::core::domain::model::{object_ref::ObjectRef, protocol::Protocol};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A baseboard management controller described independently of any machine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Bmc {
    pub name: String,
    pub spec: BmcSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmcSpec {
    /// Address given directly on the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<InlineEndpoint>,
    /// Address held by a separate endpoint record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_ref: Option<ObjectRef>,
    pub protocol: Protocol,
    pub bmc_secret_ref: ObjectRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineEndpoint {
    pub ip: IpAddr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

/// Where a BMC's address comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSource<'a> {
    Inline(IpAddr),
    Reference(&'a ObjectRef),
}

impl BmcSpec {
    /// Returns the effective endpoint source.
    ///
    /// When both fields are set the inline endpoint wins.
    pub fn endpoint_source(&self) -> Option<EndpointSource<'_>> {
        match (&self.endpoint, &self.endpoint_ref) {
            (Some(endpoint), _) => Some(EndpointSource::Inline(endpoint.ip)),
            (None, Some(reference)) => Some(EndpointSource::Reference(reference)),
            (None, None) => None,
        }
    }
}

impl Bmc {
    /// Creates a BMC record with an inline endpoint.
    pub fn with_endpoint(
        name: impl Into<String>,
        ip: IpAddr,
        protocol: Protocol,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            spec: BmcSpec {
                endpoint: Some(InlineEndpoint {
                    ip,
                    mac_address: None,
                }),
                endpoint_ref: None,
                protocol,
                bmc_secret_ref: ObjectRef::new(secret),
            },
        }
    }

    /// Creates a BMC record whose address lives in an endpoint record.
    pub fn with_endpoint_ref(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        protocol: Protocol,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            spec: BmcSpec {
                endpoint: None,
                endpoint_ref: Some(ObjectRef::new(endpoint)),
                protocol,
                bmc_secret_ref: ObjectRef::new(secret),
            },
        }
    }
}

/// Name given to the machine discovered as the `index`-th system behind a BMC.
pub fn system_name_for_bmc(bmc: &Bmc, index: usize) -> String {
    format!("{}-system-{}", bmc.name, index)
}
