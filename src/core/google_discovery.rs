use async_trait::async_trait;
use serde_json::Value;
use crate::core::http_client;
use crate::core::strategy::DiscoveryStrategy;
use crate::models::endpoint::Endpoint;

pub struct GoogleDiscoveryStrategy;

impl GoogleDiscoveryStrategy {
    pub fn new() -> Self {
        GoogleDiscoveryStrategy
    }

    // 深度优先走resources树，methods下的每个叶子都是一个端点
    fn walk_resources(
        base_url: &str,
        status_code: u16,
        resources: &Value,
        endpoints: &mut Vec<Endpoint>,
    ) {
        let Some(resources) = resources.as_object() else {
            return;
        };
        for resource in resources.values() {
            if let Some(methods) = resource.get("methods").and_then(Value::as_object) {
                for method in methods.values() {
                    let (Some(path), Some(http_method)) = (
                        method.get("path").and_then(Value::as_str),
                        method.get("httpMethod").and_then(Value::as_str),
                    ) else {
                        continue;
                    };
                    let clean_path: String =
                        path.chars().filter(|c| *c != '{' && *c != '}').collect();
                    endpoints.push(Endpoint {
                        url: format!("{}/{}", base_url, clean_path.trim_start_matches('/')),
                        method: http_method.to_uppercase(),
                        status_code,
                        is_authenticated: None,
                        suggested_payload: None,
                        spec_source: Some("?discovery=rest&version=v1".to_string()),
                    });
                }
            }
            if let Some(nested) = resource.get("resources") {
                Self::walk_resources(base_url, status_code, nested, endpoints);
            }
        }
    }
}

#[async_trait]
impl DiscoveryStrategy for GoogleDiscoveryStrategy {
    fn name(&self) -> &'static str {
        "google_discovery"
    }

    async fn discover(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        let url = format!("{}?discovery=rest&version=v1", base_url);
        let Ok(resp) = http_client::get(&url, None, timeout_secs).await else {
            return Vec::new();
        };
        if resp.status_code != 200 {
            return Vec::new();
        }
        let Ok(document) = serde_json::from_str::<Value>(&resp.body) else {
            return Vec::new();
        };
        let Some(resources) = document.get("resources") else {
            return Vec::new();
        };
        let mut endpoints = Vec::new();
        Self::walk_resources(base_url, resp.status_code, resources, &mut endpoints);
        endpoints
    }
}
