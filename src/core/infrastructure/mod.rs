pub mod redfish_client;
pub mod resource_store;
