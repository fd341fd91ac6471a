use std::collections::HashMap;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use serde_json::Value;
use time::{Duration, OffsetDateTime};
use crate::models::token_analysis::{JwtAnalysis, TokenAnalysis};

// 固定扫描的凭证请求头
const AUTH_HEADER_NAMES: [&str; 5] = [
    "Authorization",
    "authorization",
    "X-Auth-Token",
    "X-API-Key",
    "Api-Key",
];

pub fn analyze_auth_headers(headers: &HashMap<String, String>) -> TokenAnalysis {
    analyze_auth_headers_at(headers, OffsetDateTime::now_utc())
}

// 时钟显式传入，测试用固定时间
pub(crate) fn analyze_auth_headers_at(
    headers: &HashMap<String, String>,
    now: OffsetDateTime,
) -> TokenAnalysis {
    let mut analysis = TokenAnalysis::default();
    for name in AUTH_HEADER_NAMES {
        let Some(value) = headers.get(name) else {
            continue;
        };
        analysis.auth_headers_found.push(name.to_string());
        // 只有bearer类的头才按JWT解析
        let normalized = name.to_lowercase();
        if normalized != "authorization" && normalized != "x-auth-token" {
            continue;
        }
        let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
        let jwt = analyze_jwt(token, now);
        if jwt.is_expired {
            analysis.has_expired_tokens = true;
        }
        if let Some(ref warning) = jwt.warning_message {
            analysis.warnings.push(format!("{}: {}", name, warning));
        }
        analysis.jwt_analysis.insert(name.to_string(), jwt);
    }
    analysis
}

fn token_preview(token: &str) -> String {
    format!("{}...", token.chars().take(20).collect::<String>())
}

// base64url补齐到4的倍数再解
pub(crate) fn decode_base64url_segment(segment: &str) -> Option<Vec<u8>> {
    let mut padded = segment.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    URL_SAFE.decode(padded).ok()
}

fn failure(token: &str, warning: &str) -> JwtAnalysis {
    JwtAnalysis {
        expiration_datetime: None,
        warning_message: Some(warning.to_string()),
        // 解析不出来就不下结论
        is_expired: false,
        token_preview: token_preview(token),
    }
}

// 按能装下的最大单位描述时间差
fn describe_span(delta: Duration) -> String {
    if delta.whole_days() > 0 {
        format!("{} days", delta.whole_days())
    } else if delta.whole_seconds() > 3600 {
        format!("{} hours", delta.whole_hours())
    } else {
        format!("{} minutes", delta.whole_minutes())
    }
}

fn analyze_jwt(token: &str, now: OffsetDateTime) -> JwtAnalysis {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return failure(token, "Token is not a JWT (expected 3 segments)");
    }
    let Some(payload) = decode_base64url_segment(parts[1]) else {
        return failure(token, "JWT payload is not valid base64url");
    };
    let Ok(claims) = serde_json::from_slice::<Value>(&payload) else {
        return failure(token, "JWT payload is not valid JSON");
    };
    let Some(claims) = claims.as_object() else {
        return failure(token, "JWT payload is not a JSON object");
    };
    let Some(exp) = claims.get("exp").and_then(Value::as_i64) else {
        return failure(token, "JWT token has no expiration claim");
    };
    let Ok(expiration) = OffsetDateTime::from_unix_timestamp(exp) else {
        return failure(token, "JWT exp claim is out of range");
    };

    // exp正好等于now也算过期
    let is_expired = expiration <= now;
    let warning = if is_expired {
        format!("Token expired {} ago", describe_span(now - expiration))
    } else if expiration - now <= Duration::minutes(5) {
        "Token expires very soon!".to_string()
    } else {
        format!("Token expires in {}", describe_span(expiration - now))
    };

    JwtAnalysis {
        expiration_datetime: Some(expiration),
        warning_message: Some(warning),
        is_expired,
        token_preview: token_preview(token),
    }
}
