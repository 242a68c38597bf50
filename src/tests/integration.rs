use crate::{
    BmcController, BmcResolver, BmcResult, BmcSecret, InMemoryResourceStore, Machine, PowerState,
    Protocol,
};
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;

fn setup() {
    dotenv().ok();
}

#[tokio::test]
#[ignore = "requires a reachable BMC and environment variables"]
async fn test_integration_power_state() -> BmcResult<()> {
    setup();
    let address = env::var("BMC_ADDRESS").expect("BMC_ADDRESS not set");
    let port: u16 = env::var("BMC_PORT")
        .expect("BMC_PORT not set")
        .parse()
        .expect("invalid port");
    let username = env::var("BMC_USERNAME").expect("BMC_USERNAME not set");
    let password = env::var("BMC_PASSWORD").expect("BMC_PASSWORD not set");
    let protocol = env::var("BMC_PROTOCOL").unwrap_or_else(|_| "Redfish".to_string());
    let system_id = env::var("BMC_SYSTEM_ID").unwrap_or_else(|_| "1".to_string());

    let store = Arc::new(InMemoryResourceStore::new());
    store
        .put_bmc_secret(BmcSecret::with_credentials("live-secret", username, password))
        .await;

    let resolver = BmcResolver::builder()
        .store(store)
        .accept_invalid_certs(true) // allow self-signed certs for testing
        .build()?;

    let machine = Machine::with_inline_bmc(
        "live-machine",
        address,
        Protocol::new(protocol, port),
        "live-secret",
    );
    let client = resolver.client_for_machine(&machine).await?;

    let state = client.power_state(&system_id).await?;
    assert_ne!(state, PowerState::Unknown);
    Ok(())
}
