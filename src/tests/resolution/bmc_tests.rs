use crate::{
    Bmc, BmcClient, BmcController, BmcError, BmcResolver, BmcSecret, CredentialError,
    CredentialField, Endpoint, InMemoryResourceStore, InlineEndpoint, PollingOptions, Protocol,
    ProtocolName, ResourceKind, StoreError,
    core::infrastructure::resource_store::MockResourceStore,
};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

fn ip(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
}

#[tokio::test]
async fn test_bmc_inline_endpoint_overrides_endpoint_ref() {
    let store = Arc::new(InMemoryResourceStore::new());
    store.put_endpoint(Endpoint::new("shared-ep", ip(5))).await;
    store
        .put_bmc_secret(BmcSecret::with_credentials("s", "root", "calvin"))
        .await;
    let resolver = BmcResolver::builder().store(store).build().unwrap();

    let mut bmc = Bmc::with_endpoint_ref("bmc-1", "shared-ep", Protocol::new("Redfish", 443), "s");
    bmc.spec.endpoint = Some(InlineEndpoint {
        ip: ip(9),
        mac_address: None,
    });

    let client = resolver.client_for_bmc(&bmc).await.unwrap();
    assert_eq!(client.endpoint().as_str(), "https://10.0.0.9:443");
}

#[tokio::test]
async fn test_bmc_endpoint_ref_is_shared_between_bmcs() {
    let store = Arc::new(InMemoryResourceStore::new());
    store.put_endpoint(Endpoint::new("shared-ep", ip(5))).await;
    store
        .put_bmc_secret(BmcSecret::with_credentials("s", "root", "calvin"))
        .await;
    let resolver = BmcResolver::builder().store(store).build().unwrap();

    let redfish = Bmc::with_endpoint_ref("bmc-a", "shared-ep", Protocol::new("Redfish", 443), "s");
    let local = Bmc::with_endpoint_ref(
        "bmc-b",
        "shared-ep",
        Protocol::new("RedfishLocal", 8443),
        "s",
    );

    let first = resolver.client_for_bmc(&redfish).await.unwrap();
    let second = resolver.client_for_bmc(&local).await.unwrap();
    assert_eq!(first.endpoint().as_str(), "https://10.0.0.5:443");
    assert_eq!(second.endpoint().as_str(), "https://10.0.0.5:8443");
    assert!(matches!(second, BmcClient::RedfishLocal(_)));
}

#[tokio::test]
async fn test_bmc_unsupported_protocol_fetches_secret_but_skips_extraction() {
    let mut store = MockResourceStore::new();
    store.expect_get_endpoint().never();
    store
        .expect_get_bmc_secret()
        .withf(|name| name == "s")
        .times(1)
        // No credentials at all: extraction would fail if it ran.
        .returning(|name| Ok(BmcSecret::new(name)));
    let resolver = BmcResolver::builder().store(Arc::new(store)).build().unwrap();

    let bmc = Bmc::with_endpoint("bmc-1", ip(5), Protocol::new("unknown-proto", 443), "s");
    let result = resolver.client_for_bmc(&bmc).await;

    assert!(matches!(
        result,
        Err(BmcError::UnsupportedProtocol(name)) if name == "unknown-proto"
    ));
}

#[tokio::test]
async fn test_bmc_secret_store_failure_is_surfaced() {
    let mut store = MockResourceStore::new();
    store
        .expect_get_bmc_secret()
        .times(1)
        .returning(|_| Err(StoreError::Unavailable("etcd timeout".to_string())));
    let resolver = BmcResolver::builder().store(Arc::new(store)).build().unwrap();

    let bmc = Bmc::with_endpoint("bmc-1", ip(5), Protocol::new("Redfish", 443), "s");
    let err = resolver.client_for_bmc(&bmc).await.unwrap_err();

    assert!(matches!(
        &err,
        BmcError::Lookup {
            kind: ResourceKind::BmcSecret,
            source: StoreError::Unavailable(_),
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "failed to get BMC secret 's': resource store unavailable: etcd timeout"
    );
}

#[tokio::test]
async fn test_bmc_secret_without_password() {
    let store = Arc::new(InMemoryResourceStore::new());
    store
        .put_bmc_secret(BmcSecret::new("s").with_data("username", "root"))
        .await;
    let resolver = BmcResolver::builder().store(store).build().unwrap();

    let bmc = Bmc::with_endpoint("bmc-1", ip(5), Protocol::new("RedfishKube", 443), "s");
    let result = resolver.client_for_bmc(&bmc).await;

    assert!(matches!(
        result,
        Err(BmcError::Credentials {
            protocol: ProtocolName::RedfishKube,
            source: CredentialError::MissingField(CredentialField::Password),
        })
    ));
}

#[test]
fn test_create_client_from_explicit_parameters() {
    let resolver = BmcResolver::builder()
        .store(Arc::new(InMemoryResourceStore::new()))
        .build()
        .unwrap();
    let polling = PollingOptions::default();

    let client = resolver
        .create_client(
            "Redfish-Kube",
            "10.0.0.5",
            443,
            &BmcSecret::with_credentials("s", "admin", "password"),
            false,
            &polling,
        )
        .unwrap();

    assert_eq!(client.protocol(), ProtocolName::RedfishKube);
    assert_eq!(client.endpoint().as_str(), "https://10.0.0.5:443");
    assert_eq!(client.options().polling, polling);
}
