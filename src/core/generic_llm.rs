use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::json;
use tokio::sync::Semaphore;
use crate::core::http_client;
use crate::core::strategy::DiscoveryStrategy;
use crate::models::endpoint::Endpoint;
use crate::models::strategy_config::StrategyConfig;

const ACCEPTED_STATUS: [u16; 4] = [200, 400, 401, 403];

// 常见推理服务路径
const INFERENCE_PATHS: [&str; 5] = [
    "/v1/chat/completions",
    "/v1/completions",
    "/v1/embeddings",
    "/api/generate",
    "/generate",
];

const METHODS: [&str; 2] = ["GET", "POST"];

// 固定大小的worker池
const WORKER_POOL_SIZE: usize = 10;

pub struct GenericLlmStrategy {
    config: StrategyConfig,
}

impl GenericLlmStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        GenericLlmStrategy { config }
    }

    fn auth_headers(&self) -> Option<HashMap<String, String>> {
        self.config.api_key.as_ref().map(|key| {
            HashMap::from([("Authorization".to_string(), format!("Bearer {}", key))])
        })
    }

    // 单个探测，每个探测独占自己的请求和结果
    async fn probe(
        url: String,
        method: &'static str,
        headers: Option<HashMap<String, String>>,
        has_key: bool,
        timeout_secs: u64,
    ) -> Option<Endpoint> {
        let result = if method == "POST" {
            http_client::post_json(&url, headers.as_ref(), &json!({"prompt": "ping"}), timeout_secs)
                .await
        } else {
            http_client::get(&url, headers.as_ref(), timeout_secs).await
        };
        match result {
            // 状态码在接受集里且响应是json才算数
            Ok(resp) if ACCEPTED_STATUS.contains(&resp.status_code) && resp.is_json() => {
                Some(Endpoint {
                    url,
                    method: method.to_string(),
                    status_code: resp.status_code,
                    is_authenticated: Some(has_key),
                    suggested_payload: if method == "POST" {
                        Some(HashMap::from([("prompt".to_string(), json!("ping"))]))
                    } else {
                        None
                    },
                    spec_source: None,
                })
            }
            _ => None,
        }
    }
}

#[async_trait]
impl DiscoveryStrategy for GenericLlmStrategy {
    fn name(&self) -> &'static str {
        "generic_llm"
    }

    async fn discover(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        let semaphore = Arc::new(Semaphore::new(WORKER_POOL_SIZE));
        let has_key = self.config.api_key.is_some();
        let mut probes = FuturesUnordered::new();
        // 路径×方法的笛卡尔积，一个不多一个不少
        for path in INFERENCE_PATHS {
            for method in METHODS {
                let url = format!("{}{}", base_url, path);
                let headers = self.auth_headers();
                let semaphore = semaphore.clone();
                probes.push(tokio::spawn(async move {
                    // 拿到许可才开始发请求
                    let _permit = semaphore.acquire_owned().await;
                    Self::probe(url, method, headers, has_key, timeout_secs).await
                }));
            }
        }
        // 按完成顺序收集，池子排空才返回
        let mut endpoints = Vec::new();
        while let Some(joined) = probes.next().await {
            if let Ok(Some(endpoint)) = joined {
                endpoints.push(endpoint);
            }
        }
        endpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_json_probes_collected_as_set() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "auth"})))
            .mount(&server)
            .await;
        // 其余全是404或非json
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let strategy =
            GenericLlmStrategy::new(StrategyConfig::with_api_key(Some("K".to_string())));
        let endpoints = strategy.discover(&server.uri(), 5).await;

        // 完成顺序不定，按集合断言
        assert_eq!(endpoints.len(), 2);
        assert!(endpoints.iter().all(|e| e.method == "POST"));
        let statuses: std::collections::HashSet<u16> =
            endpoints.iter().map(|e| e.status_code).collect();
        assert_eq!(statuses, [200u16, 401u16].into_iter().collect());
        for e in &endpoints {
            assert_eq!(e.is_authenticated, Some(true));
            assert_eq!(
                e.suggested_payload.as_ref().unwrap().get("prompt").unwrap(),
                "ping"
            );
        }
    }

    #[tokio::test]
    async fn test_bearer_header_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .and(header("Authorization", "Bearer K"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let strategy =
            GenericLlmStrategy::new(StrategyConfig::with_api_key(Some("K".to_string())));
        let endpoints = strategy.discover(&server.uri(), 5).await;
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].url, format!("{}/v1/completions", server.uri()));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_empty() {
        let strategy = GenericLlmStrategy::new(StrategyConfig::default());
        let endpoints = strategy.discover("http://127.0.0.1:1", 1).await;
        assert!(endpoints.is_empty());
    }
}
