pub mod anthropic;
pub mod dispatcher;
pub mod generic_llm;
pub mod github;
pub mod google_discovery;
pub mod http_client;
pub mod openapi;
pub(crate) mod show_endpoints_table;
pub mod strategy;
pub mod token_introspector;
pub mod weather;
