use async_trait::async_trait;
use serde_json::Value;
use crate::core::http_client;
use crate::core::strategy::DiscoveryStrategy;
use crate::models::endpoint::Endpoint;

// 按约定俗成的顺序探测描述文档
const DESCRIPTOR_PATHS: [&str; 6] = [
    "/.well-known/openapi.yaml",
    "/.well-known/openapi.json",
    "/openapi.yaml",
    "/openapi.json",
    "/swagger.yaml",
    "/swagger.json",
];

const HTTP_VERBS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

pub struct OpenApiStrategy;

impl OpenApiStrategy {
    pub fn new() -> Self {
        OpenApiStrategy
    }

    // yaml和json两种格式，按扩展名决定解析器
    fn parse_descriptor(path: &str, body: &str) -> Option<Value> {
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            serde_yaml::from_str(body).ok()
        } else {
            serde_json::from_str(body).ok()
        }
    }

    fn extract_endpoints(
        base_url: &str,
        descriptor_path: &str,
        status_code: u16,
        document: &Value,
    ) -> Vec<Endpoint> {
        let mut endpoints = Vec::new();
        let Some(paths) = document.get("paths").and_then(Value::as_object) else {
            return endpoints;
        };
        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                continue;
            };
            for verb in item.keys() {
                if !HTTP_VERBS.contains(&verb.as_str()) {
                    continue;
                }
                // 去掉路径模板里的花括号
                let clean_path: String = path.chars().filter(|c| *c != '{' && *c != '}').collect();
                endpoints.push(Endpoint {
                    url: format!("{}{}", base_url, clean_path),
                    method: verb.to_uppercase(),
                    status_code,
                    is_authenticated: None,
                    suggested_payload: None,
                    spec_source: Some(descriptor_path.to_string()),
                });
            }
        }
        endpoints
    }
}

#[async_trait]
impl DiscoveryStrategy for OpenApiStrategy {
    fn name(&self) -> &'static str {
        "openapi"
    }

    async fn discover(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        for descriptor_path in DESCRIPTOR_PATHS {
            let url = format!("{}{}", base_url, descriptor_path);
            let Ok(resp) = http_client::get(&url, None, timeout_secs).await else {
                continue;
            };
            if resp.status_code != 200 {
                continue;
            }
            let Some(document) = Self::parse_descriptor(descriptor_path, &resp.body) else {
                continue;
            };
            let endpoints =
                Self::extract_endpoints(base_url, descriptor_path, resp.status_code, &document);
            // 第一个解析出端点的描述文档胜出
            if !endpoints.is_empty() {
                return endpoints;
            }
        }
        Vec::new()
    }
}
