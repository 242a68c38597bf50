pub mod client_factory;
pub mod endpoint_resolver;
