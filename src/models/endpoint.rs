use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub url: String,
    pub method: String,
    pub status_code: u16,
    // 规范解析出来的端点不带这个字段，探测出来的一定带。缺省和false含义不同
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_authenticated: Option<bool>,
    // 给后续fuzz用的请求体提示
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_payload: Option<HashMap<String, Value>>,
    // 描述文档的发现路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_source: Option<String>,
}
