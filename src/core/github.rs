use std::collections::HashMap;
use async_trait::async_trait;
use serde_json::json;
use crate::core::http_client;
use crate::core::strategy::DiscoveryStrategy;
use crate::models::endpoint::Endpoint;
use crate::models::strategy_config::StrategyConfig;

// GitHub探测不把401算进去，公开端点没token也能拿到2xx
const ACCEPTED_STATUS: [u16; 3] = [200, 201, 204];

const GITHUB_PATHS: [&str; 6] = [
    "/user",
    "/user/repos",
    "/repos",
    "/rate_limit",
    "/zen",
    "/events",
];

// 这些是集合端点，发现之后额外合成一个POST创建端点
const COLLECTION_PATHS: [&str; 2] = ["/user/repos", "/repos"];

pub struct GitHubStrategy {
    config: StrategyConfig,
}

impl GitHubStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        GitHubStrategy { config }
    }

    fn auth_headers(&self) -> Option<HashMap<String, String>> {
        self.config.api_key.as_ref().map(|key| {
            HashMap::from([("Authorization".to_string(), format!("token {}", key))])
        })
    }

    pub(crate) async fn probe_paths(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        let headers = self.auth_headers();
        let mut endpoints = Vec::new();
        for path in GITHUB_PATHS {
            let url = format!("{}{}", base_url, path);
            match http_client::get(&url, headers.as_ref(), timeout_secs).await {
                Ok(resp) if ACCEPTED_STATUS.contains(&resp.status_code) => {
                    endpoints.push(Endpoint {
                        url: url.clone(),
                        method: "GET".to_string(),
                        status_code: resp.status_code,
                        is_authenticated: Some(self.config.api_key.is_some()),
                        suggested_payload: None,
                        spec_source: None,
                    });
                    if COLLECTION_PATHS.contains(&path) {
                        endpoints.push(Endpoint {
                            url,
                            method: "POST".to_string(),
                            status_code: resp.status_code,
                            is_authenticated: Some(true),
                            suggested_payload: Some(HashMap::from([
                                ("name".to_string(), json!("test-repo")),
                                ("description".to_string(), json!("created by probe")),
                                ("private".to_string(), json!(false)),
                            ])),
                            spec_source: None,
                        });
                    }
                }
                _ => {}
            }
        }
        endpoints
    }
}

#[async_trait]
impl DiscoveryStrategy for GitHubStrategy {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn discover(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        // 门控比weather那边更严，必须以官方host结尾
        if !base_url.ends_with("api.github.com") {
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
    async fn test_host_gate_requires_suffix() {
        let strategy = GitHubStrategy::new(StrategyConfig::default());
        assert!(strategy.discover("https://api.github.com.evil.io", 1).await.is_empty());
        assert!(strategy.discover("https://gitlab.com", 1).await.is_empty());
    }

    #[tokio::test]
    async fn test_probe_keeps_only_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rate_limit"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/zen"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let strategy = GitHubStrategy::new(StrategyConfig::default());
        let endpoints = strategy.probe_paths(&server.uri(), 5).await;

        assert_eq!(endpoints.len(), 2);
        for e in &endpoints {
            assert_eq!(e.method, "GET");
            assert_eq!(e.is_authenticated, Some(false));
        }
    }

    #[tokio::test]
    async fn test_collection_path_synthesizes_post() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let strategy = GitHubStrategy::new(StrategyConfig::with_api_key(Some("t".to_string())));
        let endpoints = strategy.probe_paths(&server.uri(), 5).await;

        assert_eq!(endpoints.len(), 2);
        let post = endpoints.iter().find(|e| e.method == "POST").unwrap();
        assert_eq!(post.is_authenticated, Some(true));
        let payload = post.suggested_payload.as_ref().unwrap();
        assert_eq!(payload.get("private").unwrap(), false);
        assert!(payload.contains_key("name"));
        assert!(payload.contains_key("description"));
    }
}
