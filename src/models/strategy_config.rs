use serde::{Deserialize, Serialize};

// 每个策略实例一份，构造之后不再修改
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct StrategyConfig {
    // key的用法由策略自己定: Bearer头、token头、X-API-Key、query参数等
    pub api_key: Option<String>,
}

impl StrategyConfig {
    pub fn with_api_key(api_key: Option<String>) -> Self {
        StrategyConfig { api_key }
    }
}
