#[cfg(feature = "python-extension")]
use pyo3::prelude::*;
#[cfg(feature = "python-extension")]
use pyo3::types::{PyDict, PyList};
#[cfg(feature = "python-extension")]
use tokio::runtime::Runtime;

pub mod core;
pub mod models;

pub use crate::core::dispatcher::EndpointDiscoveryService;
pub use crate::core::strategy::DiscoveryStrategy;
pub use crate::core::token_introspector::analyze_auth_headers;
pub use crate::models::endpoint::Endpoint;
pub use crate::models::strategy_config::StrategyConfig;
pub use crate::models::token_analysis::{JwtAnalysis, TokenAnalysis};

// 平台其他部分只依赖这一个入口
pub async fn discover_endpoints(base_url: &str, timeout_secs: u64) -> Vec<Endpoint> {
    discover_endpoints_with_config(base_url, timeout_secs, StrategyConfig::default()).await
}

pub async fn discover_endpoints_with_config(
    base_url: &str,
    timeout_secs: u64,
    config: StrategyConfig,
) -> Vec<Endpoint> {
    EndpointDiscoveryService::new(config)
        .discover_endpoints(base_url, timeout_secs)
        .await
}

#[cfg(feature = "python-extension")]
#[pyfunction]
fn discover_sync(
    py: Python,
    url: String,
    timeout_secs: u64,
    api_key: Option<String>,
) -> PyResult<PyObject> {
    let rt = Runtime::new().unwrap();
    let endpoints = rt.block_on(async move {
        discover_endpoints_with_config(&url, timeout_secs, StrategyConfig::with_api_key(api_key))
            .await
    });

    let list = PyList::empty(py);
    for e in endpoints {
        let dict = PyDict::new(py);
        dict.set_item("url", e.url)?;
        dict.set_item("method", e.method)?;
        dict.set_item("status_code", e.status_code)?;
        if let Some(is_authenticated) = e.is_authenticated {
            dict.set_item("is_authenticated", is_authenticated)?;
        }
        if let Some(ref payload) = e.suggested_payload {
            dict.set_item(
                "suggested_payload",
                serde_json::to_string(payload).unwrap_or_default(),
            )?;
        }
        if let Some(spec_source) = e.spec_source {
            dict.set_item("spec_source", spec_source)?;
        }
        list.append(dict)?;
    }
    Ok(list.into())
}

#[cfg(feature = "python-extension")]
#[pymodule]
fn engine(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(discover_sync, m)?)?;
    Ok(())
}
