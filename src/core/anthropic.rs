use std::collections::HashMap;
use async_trait::async_trait;
use serde_json::{json, Value};
use crate::core::http_client;
use crate::core::strategy::DiscoveryStrategy;
use crate::models::endpoint::Endpoint;
use crate::models::strategy_config::StrategyConfig;

// 鉴权和参数错误都算存在证据，但这里不收429
const ACCEPTED_STATUS: [u16; 4] = [200, 400, 401, 403];

pub struct AnthropicStrategy {
    config: StrategyConfig,
}

// 每条路径带自己的方法和最小请求体
fn path_table() -> Vec<(&'static str, &'static str, Option<HashMap<String, Value>>)> {
    vec![
        ("/v1/models", "GET", None),
        (
            "/v1/messages",
            "POST",
            Some(HashMap::from([
                ("model".to_string(), json!("claude-3-haiku-20240307")),
                ("max_tokens".to_string(), json!(1)),
                (
                    "messages".to_string(),
                    json!([{"role": "user", "content": "ping"}]),
                ),
            ])),
        ),
        (
            "/v1/complete",
            "POST",
            Some(HashMap::from([
                ("model".to_string(), json!("claude-2")),
                ("prompt".to_string(), json!("\n\nHuman: ping\n\nAssistant:")),
                ("max_tokens_to_sample".to_string(), json!(0)),
            ])),
        ),
        (
            "/v1/embeddings",
            "POST",
            Some(HashMap::from([
                ("model".to_string(), json!("claude-3-haiku-20240307")),
                ("input".to_string(), json!("ping")),
            ])),
        ),
    ]
}

impl AnthropicStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        AnthropicStrategy { config }
    }

    fn auth_headers(&self) -> Option<HashMap<String, String>> {
        self.config
            .api_key
            .as_ref()
            .map(|key| HashMap::from([("X-API-Key".to_string(), key.clone())]))
    }

    pub(crate) async fn probe_paths(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        let headers = self.auth_headers();
        let mut endpoints = Vec::new();
        for (path, method, payload) in path_table() {
            let url = format!("{}{}", base_url, path);
            let result = if method == "POST" {
                let body = payload
                    .as_ref()
                    .map(|p| Value::Object(p.clone().into_iter().collect()))
                    .unwrap_or_else(|| json!({}));
                http_client::post_json(&url, headers.as_ref(), &body, timeout_secs).await
            } else {
                http_client::get(&url, headers.as_ref(), timeout_secs).await
            };
            match result {
                // 必须是json响应，过滤掉通用错误页
                Ok(resp)
                    if ACCEPTED_STATUS.contains(&resp.status_code)
                        && resp.content_type().contains("application/json") =>
                {
                    endpoints.push(Endpoint {
                        url,
                        method: method.to_string(),
                        status_code: resp.status_code,
                        is_authenticated: Some(self.config.api_key.is_some()),
                        suggested_payload: payload,
                        spec_source: None,
                    });
                }
                _ => {}
            }
        }
        endpoints
    }
}

#[async_trait]
impl DiscoveryStrategy for AnthropicStrategy {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn discover(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        if !base_url.contains("anthropic.com") {
            return Vec::new();
        }
        self.probe_paths(base_url, timeout_secs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_host_gate() {
        let strategy = AnthropicStrategy::new(StrategyConfig::default());
        assert!(strategy.discover("https://api.openai.com", 1).await.is_empty());
    }

    #[tokio::test]
    async fn test_requires_json_content_type() {
        let server = MockServer::start().await;
        // 401但返回html错误页，不算发现
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(401).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let strategy = AnthropicStrategy::new(StrategyConfig::default());
        let endpoints = strategy.probe_paths(&server.uri(), 5).await;
        assert!(endpoints.is_empty());
    }

    #[tokio::test]
    async fn test_method_per_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(serde_json::json!({"error": "auth"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "bad"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let strategy =
            AnthropicStrategy::new(StrategyConfig::with_api_key(Some("sk-test".to_string())));
        let endpoints = strategy.probe_paths(&server.uri(), 5).await;

        assert_eq!(endpoints.len(), 2);
        let models = endpoints.iter().find(|e| e.url.ends_with("/v1/models")).unwrap();
        assert_eq!(models.method, "GET");
        let messages = endpoints.iter().find(|e| e.url.ends_with("/v1/messages")).unwrap();
        assert_eq!(messages.method, "POST");
        assert_eq!(messages.is_authenticated, Some(true));
        let payload = messages.suggested_payload.as_ref().unwrap();
        assert!(payload.contains_key("max_tokens"));
    }
}
