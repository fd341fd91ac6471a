use async_trait::async_trait;
use crate::models::endpoint::Endpoint;

// 发现策略的统一契约: 只返回结果或空列表，网络和解析错误都在策略内部消化
#[async_trait]
pub trait DiscoveryStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    // 超时是单个请求的预算，不是整个策略的
    async fn discover(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint>;
}
