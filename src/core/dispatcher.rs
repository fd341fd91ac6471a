use std::sync::Arc;
use crate::core::anthropic::AnthropicStrategy;
use crate::core::generic_llm::GenericLlmStrategy;
use crate::core::github::GitHubStrategy;
use crate::core::google_discovery::GoogleDiscoveryStrategy;
use crate::core::openapi::OpenApiStrategy;
use crate::core::strategy::DiscoveryStrategy;
use crate::core::weather::WeatherStrategy;
use crate::models::endpoint::Endpoint;
use crate::models::strategy_config::StrategyConfig;

pub struct EndpointDiscoveryService {
    strategies: Vec<Arc<dyn DiscoveryStrategy>>,
}

impl EndpointDiscoveryService {
    // 注册顺序固定: 特异性高的在前，门控不命中时它们的开销接近零
    pub fn new(config: StrategyConfig) -> Self {
        EndpointDiscoveryService {
            strategies: vec![
                Arc::new(WeatherStrategy::new(config.clone())),
                Arc::new(GitHubStrategy::new(config.clone())),
                Arc::new(OpenApiStrategy::new()),
                Arc::new(GoogleDiscoveryStrategy::new()),
                Arc::new(GenericLlmStrategy::new(config)),
            ],
        }
    }

    // anthropic策略默认不注册，需要的调用方用这个构造
    pub fn with_anthropic(config: StrategyConfig) -> Self {
        EndpointDiscoveryService {
            strategies: vec![
                Arc::new(WeatherStrategy::new(config.clone())),
                Arc::new(GitHubStrategy::new(config.clone())),
                Arc::new(AnthropicStrategy::new(config.clone())),
                Arc::new(OpenApiStrategy::new()),
                Arc::new(GoogleDiscoveryStrategy::new()),
                Arc::new(GenericLlmStrategy::new(config)),
            ],
        }
    }

    pub fn with_strategies(strategies: Vec<Arc<dyn DiscoveryStrategy>>) -> Self {
        EndpointDiscoveryService { strategies }
    }

    // 没写协议就补https，去掉一个结尾斜杠
    pub fn normalize_url(base_url: &str) -> String {
        let mut url = base_url.trim().to_string();
        if !url.contains("://") {
            url = format!("https://{}", url);
        }
        if url.ends_with('/') {
            url.pop();
        }
        url
    }

    // 按注册顺序逐个尝试，第一个非空结果直接返回
    pub async fn discover_endpoints(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        let url = Self::normalize_url(base_url);
        for strategy in &self.strategies {
            let name = strategy.name();
            let strategy = strategy.clone();
            let url_clone = url.clone();
            // spawn一层把策略里的panic也挡住，后面的策略照常跑
            let joined =
                tokio::spawn(async move { strategy.discover(&url_clone, timeout_secs).await })
                    .await;
            match joined {
                Ok(endpoints) if !endpoints.is_empty() => {
                    tracing::debug!("策略{}发现{}个端点", name, endpoints.len());
                    return endpoints;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("策略{}执行失败: {:?}", name, e);
                }
            }
        }
        Vec::new()
    }
}
