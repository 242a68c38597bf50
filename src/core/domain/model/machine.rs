//! Machine records.

use crate::core::domain::model::{object_ref::ObjectRef, protocol::Protocol};
use serde::{Deserialize, Serialize};

/// A physical server managed by the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Machine {
    pub name: String,
    pub spec: MachineSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmc_ref: Option<ObjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmc: Option<InlineBmc>,
}

/// BMC access configured directly on a machine record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineBmc {
    pub address: String,
    pub protocol: Protocol,
    pub bmc_secret_ref: ObjectRef,
}

/// Where a machine's BMC configuration comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmcSource<'a> {
    Reference(&'a ObjectRef),
    Inline(&'a InlineBmc),
}

impl MachineSpec {
    /// Returns the effective BMC source.
    ///
    /// When both fields are set the reference wins.
    pub fn bmc_source(&self) -> Option<BmcSource<'_>> {
        match (&self.bmc_ref, &self.bmc) {
            (Some(reference), _) => Some(BmcSource::Reference(reference)),
            (None, Some(inline)) => Some(BmcSource::Inline(inline)),
            (None, None) => None,
        }
    }
}

impl Machine {
    /// Creates a machine pointing at a standalone BMC record.
    pub fn with_bmc_ref(name: impl Into<String>, bmc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: MachineSpec {
                bmc_ref: Some(ObjectRef::new(bmc)),
                bmc: None,
            },
        }
    }

    /// Creates a machine carrying its BMC configuration inline.
    pub fn with_inline_bmc(
        name: impl Into<String>,
        address: impl Into<String>,
        protocol: Protocol,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            spec: MachineSpec {
                bmc_ref: None,
                bmc: Some(InlineBmc {
                    address: address.into(),
                    protocol,
                    bmc_secret_ref: ObjectRef::new(secret),
                }),
            },
        }
    }
}
