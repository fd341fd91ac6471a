mod core;
mod models;

use clap::Parser;
use crate::core::dispatcher::EndpointDiscoveryService;
use crate::core::show_endpoints_table::show_endpoints_table;
use crate::models::args::Args;
use crate::models::strategy_config::StrategyConfig;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config = StrategyConfig::with_api_key(args.api_key);
    let service = EndpointDiscoveryService::new(config);
    let endpoints = service.discover_endpoints(&args.url, args.timeout).await;

    if args.json {
        match serde_json::to_string_pretty(&endpoints) {
            Ok(json) => println!("{}", json),
            Err(e) => println!("Error: {}", e),
        }
    } else {
        show_endpoints_table(&endpoints);
    }
}
