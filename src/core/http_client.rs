use std::collections::HashMap;
use std::time::Duration;
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::Value;

// 探测响应: 非2xx不算错误，状态码本身就是探测结果
pub struct ProbeResponse {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl ProbeResponse {
    // Content-Type，取不到就返回空串
    pub fn content_type(&self) -> &str {
        self.headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    pub fn is_json(&self) -> bool {
        self.content_type().contains("json")
    }
}

// 构建带超时的http客户端，超时覆盖连接+读取
fn build_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("构建带超时的http客户端失败")
}

// user_agent
fn user_agent_value() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

// 把调用方的请求头塞进HeaderMap，解析不了的跳过
fn merge_headers(extra: Option<&HashMap<String, String>>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(ua) = HeaderValue::from_str(&user_agent_value()) {
        headers.insert(USER_AGENT, ua);
    }
    if let Some(extra) = extra {
        for (name, value) in extra {
            match (name.parse::<HeaderName>(), HeaderValue::from_str(value)) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => {
                    tracing::debug!("无法解析请求头: '{}'", name);
                }
            }
        }
    }
    headers
}

async fn into_probe_response(response: reqwest::Response) -> anyhow::Result<ProbeResponse> {
    let status_code = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.text().await.context("读取响应体失败")?;
    Ok(ProbeResponse {
        status_code,
        headers,
        body,
    })
}

pub async fn get(
    url: &str,
    headers: Option<&HashMap<String, String>>,
    timeout_secs: u64,
) -> anyhow::Result<ProbeResponse> {
    let client = build_client(timeout_secs)?;
    let response = client
        .get(url)
        .headers(merge_headers(headers))
        .send()
        .await
        .context("请求失败")?;
    into_probe_response(response).await
}

pub async fn post_json(
    url: &str,
    headers: Option<&HashMap<String, String>>,
    body: &Value,
    timeout_secs: u64,
) -> anyhow::Result<ProbeResponse> {
    let client = build_client(timeout_secs)?;
    let response = client
        .post(url)
        .headers(merge_headers(headers))
        .json(body)
        .send()
        .await
        .context("请求失败")?;
    into_probe_response(response).await
}
