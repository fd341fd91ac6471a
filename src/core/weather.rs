use std::collections::HashMap;
use async_trait::async_trait;
use serde_json::json;
use crate::core::http_client;
use crate::core::strategy::DiscoveryStrategy;
use crate::models::endpoint::Endpoint;
use crate::models::strategy_config::StrategyConfig;

// 带上鉴权失败的状态码: 401说明端点存在只是没给对key，429说明被限流但端点在
const ACCEPTED_STATUS: [u16; 5] = [200, 201, 204, 401, 429];

const OPENWEATHER_PATHS: [&str; 7] = [
    "/data/2.5/weather",
    "/data/2.5/forecast",
    "/data/2.5/forecast/daily",
    "/data/2.5/onecall",
    "/data/2.5/air_pollution",
    "/data/2.5/uvi",
    "/geo/1.0/direct",
];

const WEATHERAPI_PATHS: [&str; 5] = [
    "/v1/current.json",
    "/v1/forecast.json",
    "/v1/search.json",
    "/v1/astronomy.json",
    "/v1/timezone.json",
];

const WEATHER_GOV_PATHS: [&str; 3] = [
    "/points/39.7456,-97.0892",
    "/alerts/active",
    "/gridpoints/TOP/31,80/forecast",
];

pub struct WeatherStrategy {
    config: StrategyConfig,
}

impl WeatherStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        WeatherStrategy { config }
    }

    // OpenWeather: key走appid参数，同时镜像一份到请求头
    pub(crate) async fn probe_openweather(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        let mut endpoints = Vec::new();
        for path in OPENWEATHER_PATHS {
            let mut url = format!("{}{}?q=London&units=metric", base_url, path);
            let mut headers: Option<HashMap<String, String>> = None;
            if let Some(ref key) = self.config.api_key {
                url.push_str(&format!("&appid={}", key));
                headers = Some(HashMap::from([("appid".to_string(), key.clone())]));
            }
            match http_client::get(&url, headers.as_ref(), timeout_secs).await {
                Ok(resp) if ACCEPTED_STATUS.contains(&resp.status_code) => {
                    endpoints.push(Endpoint {
                        url,
                        method: "GET".to_string(),
                        status_code: resp.status_code,
                        is_authenticated: Some(self.config.api_key.is_some()),
                        suggested_payload: Some(HashMap::from([
                            ("q".to_string(), json!("London")),
                            ("units".to_string(), json!("metric")),
                        ])),
                        spec_source: None,
                    });
                }
                _ => {}
            }
        }
        endpoints
    }

    // WeatherAPI: key走key参数，同样镜像到请求头
    pub(crate) async fn probe_weatherapi(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        let mut endpoints = Vec::new();
        for path in WEATHERAPI_PATHS {
            let mut url = format!("{}{}?q=London", base_url, path);
            let mut headers: Option<HashMap<String, String>> = None;
            if let Some(ref key) = self.config.api_key {
                url.push_str(&format!("&key={}", key));
                headers = Some(HashMap::from([("key".to_string(), key.clone())]));
            }
            match http_client::get(&url, headers.as_ref(), timeout_secs).await {
                Ok(resp) if ACCEPTED_STATUS.contains(&resp.status_code) => {
                    endpoints.push(Endpoint {
                        url,
                        method: "GET".to_string(),
                        status_code: resp.status_code,
                        is_authenticated: Some(self.config.api_key.is_some()),
                        suggested_payload: Some(HashMap::from([(
                            "q".to_string(),
                            json!("London"),
                        )])),
                        spec_source: None,
                    });
                }
                _ => {}
            }
        }
        endpoints
    }

    // weather.gov不需要任何凭证
    pub(crate) async fn probe_weather_gov(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        let mut endpoints = Vec::new();
        for path in WEATHER_GOV_PATHS {
            let url = format!("{}{}", base_url, path);
            match http_client::get(&url, None, timeout_secs).await {
                Ok(resp) if ACCEPTED_STATUS.contains(&resp.status_code) => {
                    endpoints.push(Endpoint {
                        url,
                        method: "GET".to_string(),
                        status_code: resp.status_code,
                        is_authenticated: Some(false),
                        suggested_payload: None,
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
impl DiscoveryStrategy for WeatherStrategy {
    fn name(&self) -> &'static str {
        "weather"
    }

    async fn discover(&self, base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
        // host门控: 认不出来就直接空手而归，不发请求
        if base_url.contains("openweathermap.org") {
            self.probe_openweather(base_url, timeout_secs).await
        } else if base_url.contains("weatherapi.com") {
            self.probe_weatherapi(base_url, timeout_secs).await
        } else if base_url.contains("api.weather.gov") {
            self.probe_weather_gov(base_url, timeout_secs).await
        } else {
            Vec::new()
        }
    }
}
