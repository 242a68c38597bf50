use crate::{
    Bmc, BmcClient, BmcController, BmcError, BmcResolver, BmcSecret, DEFAULT_KUBE_NAMESPACE,
    Endpoint, InMemoryResourceStore, Machine, ObjectRef, PollingOptions, PowerState, Protocol,
    ResourceKind, ResourceStore, StoreError, ValidationError,
};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn ip(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
}

fn test_polling() -> PollingOptions {
    PollingOptions {
        power_polling_interval: Duration::from_secs(2),
        power_polling_timeout: Duration::from_secs(60),
        resource_polling_interval: Duration::from_secs(3),
        resource_polling_timeout: Duration::from_secs(90),
    }
}

async fn create_test_store() -> Arc<InMemoryResourceStore> {
    let store = Arc::new(InMemoryResourceStore::new());
    store.put_endpoint(Endpoint::new("bmc-1-ep", ip(5))).await;
    store
        .put_bmc(Bmc::with_endpoint_ref(
            "bmc-1",
            "bmc-1-ep",
            Protocol::new("Redfish", 443),
            "bmc-1-secret",
        ))
        .await;
    store
        .put_bmc_secret(BmcSecret::with_credentials("bmc-1-secret", "root", "calvin"))
        .await;
    store.put_machine(Machine::with_bmc_ref("server-1", "bmc-1")).await;
    store
}

fn create_test_resolver(store: Arc<InMemoryResourceStore>) -> BmcResolver {
    BmcResolver::builder()
        .store(store)
        .polling(test_polling())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_machine_bmc_ref_endpoint_ref_chain() {
    let resolver = create_test_resolver(create_test_store().await);

    let client = resolver
        .client_for_machine(&Machine::with_bmc_ref("server-1", "bmc-1"))
        .await
        .unwrap();

    assert!(matches!(client, BmcClient::Redfish(_)));
    assert_eq!(client.endpoint().as_str(), "https://10.0.0.5:443");
    assert_eq!(client.options().credentials.username().as_str(), "root");
    assert_eq!(client.options().credentials.password().as_str(), "calvin");
    assert_eq!(client.options().polling, test_polling());
}

#[tokio::test]
async fn test_machine_with_inline_bmc() {
    let store = create_test_store().await;
    let resolver = create_test_resolver(store);

    let machine = Machine::with_inline_bmc(
        "server-2",
        "10.0.0.7",
        Protocol::new("RedfishLocal", 8000),
        "bmc-1-secret",
    );
    let client = resolver.client_for_machine(&machine).await.unwrap();

    assert!(matches!(client, BmcClient::RedfishLocal(_)));
    assert_eq!(client.endpoint().as_str(), "https://10.0.0.7:8000");
}

#[tokio::test]
async fn test_machine_without_bmc_fails() {
    let resolver = create_test_resolver(create_test_store().await);
    let machine = Machine {
        name: "orphan".to_string(),
        spec: Default::default(),
    };

    let result = resolver.client_for_machine(&machine).await;
    assert!(matches!(result, Err(BmcError::NoBmcConfigured(name)) if name == "orphan"));
}

#[tokio::test]
async fn test_machine_bmc_ref_takes_precedence_over_inline_bmc() {
    let resolver = create_test_resolver(create_test_store().await);

    let mut machine = Machine::with_inline_bmc(
        "server-1",
        "10.0.0.99",
        Protocol::new("RedfishLocal", 8000),
        "bmc-1-secret",
    );
    machine.spec.bmc_ref = Some(ObjectRef::new("bmc-1"));

    let client = resolver.client_for_machine(&machine).await.unwrap();
    assert!(matches!(client, BmcClient::Redfish(_)));
    assert_eq!(client.endpoint().as_str(), "https://10.0.0.5:443");
}

#[tokio::test]
async fn test_client_for_machine_name() {
    let resolver = create_test_resolver(create_test_store().await);

    let client = resolver.client_for_machine_name("server-1").await.unwrap();
    assert_eq!(client.endpoint().as_str(), "https://10.0.0.5:443");

    let result = resolver.client_for_machine_name("server-404").await;
    assert!(matches!(
        result,
        Err(BmcError::Lookup {
            kind: ResourceKind::Machine,
            source: StoreError::NotFound { .. },
            ..
        })
    ));
}

#[tokio::test]
async fn test_missing_bmc_record_is_lookup_error() {
    let resolver = create_test_resolver(create_test_store().await);

    let result = resolver
        .client_for_machine(&Machine::with_bmc_ref("server-3", "bmc-404"))
        .await;
    assert!(matches!(
        result,
        Err(BmcError::Lookup { kind: ResourceKind::Bmc, ref name, .. }) if name == "bmc-404"
    ));
}

#[tokio::test]
async fn test_missing_secret_is_lookup_error() {
    let store = create_test_store().await;
    let resolver = create_test_resolver(store);

    let machine = Machine::with_inline_bmc(
        "server-2",
        "10.0.0.7",
        Protocol::new("Redfish", 443),
        "missing-secret",
    );
    let result = resolver.client_for_machine(&machine).await;
    assert!(matches!(
        result,
        Err(BmcError::Lookup {
            kind: ResourceKind::BmcSecret,
            ..
        })
    ));
}

#[tokio::test]
async fn test_kube_machine_client_carries_store_and_namespace() {
    let store = create_test_store().await;
    store
        .put_bmc(Bmc::with_endpoint(
            "kube-bmc",
            ip(5),
            Protocol::new("Redfish-Kube", 443),
            "bmc-1-secret",
        ))
        .await;
    let shared: Arc<dyn ResourceStore> = store;
    let resolver = BmcResolver::builder()
        .store(Arc::clone(&shared))
        .build()
        .unwrap();

    let client = resolver
        .client_for_machine(&Machine::with_bmc_ref("kube-server", "kube-bmc"))
        .await
        .unwrap();

    let BmcClient::RedfishKube(kube) = &client else {
        panic!("expected a RedfishKube client, got {:?}", client);
    };
    assert_eq!(kube.endpoint().as_str(), "https://10.0.0.5:443");
    assert_eq!(kube.namespace(), DEFAULT_KUBE_NAMESPACE);
    assert!(Arc::ptr_eq(kube.store(), &shared));
}

#[tokio::test]
async fn test_repeated_resolution_is_identical_but_not_shared() {
    let resolver = create_test_resolver(create_test_store().await);
    let machine = Machine::with_bmc_ref("server-1", "bmc-1");

    let first = resolver.client_for_machine(&machine).await.unwrap();
    let second = resolver.client_for_machine(&machine).await.unwrap();

    assert_eq!(first.options(), second.options());
    assert!(!std::ptr::eq(&first, &second));
}

#[tokio::test]
async fn test_concurrent_resolution() {
    let resolver = Arc::new(create_test_resolver(create_test_store().await));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move {
                resolver
                    .client_for_machine_name("server-1")
                    .await
                    .map(|client| client.endpoint().as_str().to_string())
            })
        })
        .collect();

    for handle in handles {
        let origin = handle.await.unwrap().unwrap();
        assert_eq!(origin, "https://10.0.0.5:443");
    }
}

#[tokio::test]
async fn test_builder_requires_store() {
    let result = BmcResolver::builder().build();
    assert!(matches!(
        result,
        Err(BmcError::Validation(ValidationError::Field { ref field, .. })) if field == "store"
    ));
}

#[tokio::test]
async fn test_resolved_client_talks_to_bmc() {
    let mock_server = MockServer::start().await;
    let address = mock_server.address();

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Systems/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Id": "1",
            "PowerState": "On"
        })))
        .mount(&mock_server)
        .await;

    let store = create_test_store().await;
    let resolver = BmcResolver::builder()
        .store(store)
        .insecure(true)
        .build()
        .unwrap();

    let machine = Machine::with_inline_bmc(
        "server-mock",
        address.ip().to_string(),
        Protocol::new("Redfish", address.port()),
        "bmc-1-secret",
    );
    let client = resolver.client_for_machine(&machine).await.unwrap();

    assert_eq!(client.endpoint().scheme(), "http");
    assert_eq!(client.power_state("1").await.unwrap(), PowerState::On);
}
