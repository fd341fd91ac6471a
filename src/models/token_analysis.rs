use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtAnalysis {
    // 解析失败时为None
    #[serde(with = "time::serde::rfc3339::option")]
    pub expiration_datetime: Option<OffsetDateTime>,
    pub warning_message: Option<String>,
    // 解析不出exp时保持false
    pub is_expired: bool,
    pub token_preview: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenAnalysis {
    // 按固定扫描顺序记录命中的请求头
    pub auth_headers_found: Vec<String>,
    pub jwt_analysis: HashMap<String, JwtAnalysis>,
    pub warnings: Vec<String>,
    pub has_expired_tokens: bool,
}
