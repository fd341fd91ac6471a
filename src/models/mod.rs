pub mod args;
pub mod endpoint;
pub mod strategy_config;
pub mod token_analysis;
