//! Read-only, by-name access to the records the resolver needs.

use crate::core::domain::{
    error::{ResourceKind, StoreError},
    model::{bmc::Bmc, bmc_secret::BmcSecret, endpoint::Endpoint, machine::Machine},
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Backing store holding machine, BMC, endpoint and secret records.
///
/// Every lookup is by exact name. Implementations report a missing record
/// as `StoreError::NotFound` and any transport problem as
/// `StoreError::Unavailable`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn get_machine(&self, name: &str) -> Result<Machine, StoreError>;

    async fn get_bmc(&self, name: &str) -> Result<Bmc, StoreError>;

    async fn get_endpoint(&self, name: &str) -> Result<Endpoint, StoreError>;

    async fn get_bmc_secret(&self, name: &str) -> Result<BmcSecret, StoreError>;
}

/// A `ResourceStore` backed by in-process maps.
#[derive(Debug, Default)]
pub struct InMemoryResourceStore {
    machines: RwLock<HashMap<String, Machine>>,
    bmcs: RwLock<HashMap<String, Bmc>>,
    endpoints: RwLock<HashMap<String, Endpoint>>,
    secrets: RwLock<HashMap<String, BmcSecret>>,
}

impl InMemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a machine record under its name.
    pub async fn put_machine(&self, machine: Machine) {
        let mut lock = self.machines.write().await;
        lock.insert(machine.name.clone(), machine);
    }

    /// Inserts or replaces a BMC record under its name.
    pub async fn put_bmc(&self, bmc: Bmc) {
        let mut lock = self.bmcs.write().await;
        lock.insert(bmc.name.clone(), bmc);
    }

    /// Inserts or replaces an endpoint record under its name.
    pub async fn put_endpoint(&self, endpoint: Endpoint) {
        let mut lock = self.endpoints.write().await;
        lock.insert(endpoint.name.clone(), endpoint);
    }

    /// Inserts or replaces a secret under its name.
    pub async fn put_bmc_secret(&self, secret: BmcSecret) {
        let mut lock = self.secrets.write().await;
        lock.insert(secret.name.clone(), secret);
    }
}

fn lookup<T: Clone>(
    map: &HashMap<String, T>,
    kind: ResourceKind,
    name: &str,
) -> Result<T, StoreError> {
    map.get(name).cloned().ok_or_else(|| StoreError::NotFound {
        kind,
        name: name.to_string(),
    })
}

#[async_trait]
impl ResourceStore for InMemoryResourceStore {
    async fn get_machine(&self, name: &str) -> Result<Machine, StoreError> {
        lookup(&*self.machines.read().await, ResourceKind::Machine, name)
    }

    async fn get_bmc(&self, name: &str) -> Result<Bmc, StoreError> {
        lookup(&*self.bmcs.read().await, ResourceKind::Bmc, name)
    }

    async fn get_endpoint(&self, name: &str) -> Result<Endpoint, StoreError> {
        lookup(&*self.endpoints.read().await, ResourceKind::Endpoint, name)
    }

    async fn get_bmc_secret(&self, name: &str) -> Result<BmcSecret, StoreError> {
        lookup(&*self.secrets.read().await, ResourceKind::BmcSecret, name)
    }
}
