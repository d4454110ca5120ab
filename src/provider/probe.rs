//! Provider reachability probes.
//!
//! Each known provider gets exactly one status entry. Providers without a
//! configured API key are reported as unconfigured and never probed; the
//! rest get a minimal ping completion under a hard timeout.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::config::{display_name, AppConfig, KNOWN_PROVIDERS};

use super::http::{bearer_headers, shared_client};

/// Probe outcome for one provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reachable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ProviderStatus {
    fn unconfigured(provider: &str) -> Self {
        Self {
            name: display_name(provider).to_string(),
            configured: false,
            reachable: None,
            error: None,
            url: None,
        }
    }
}

/// Probe every known provider in fixed order.
pub async fn probe_all(config: &AppConfig) -> Vec<ProviderStatus> {
    let mut results = Vec::with_capacity(KNOWN_PROVIDERS.len());
    for provider in KNOWN_PROVIDERS {
        results.push(probe_provider(config, provider).await);
    }
    results
}

async fn probe_provider(config: &AppConfig, provider: &str) -> ProviderStatus {
    let Some(api_key) = config.get_api_key(provider) else {
        return ProviderStatus::unconfigured(provider);
    };

    let url = format!("{}/chat/completions", config.base_url(provider));
    let (reachable, error) = ping(&url, &api_key, config.model(provider), config.probe_timeout).await;
    debug!(provider, reachable, "probe complete");

    ProviderStatus {
        name: display_name(provider).to_string(),
        configured: true,
        reachable: Some(reachable),
        error,
        url: Some(url),
    }
}

/// Fire one minimal completion request; any failure mode (connect error,
/// non-2xx, timeout) is reported as unreachable with a reason.
async fn ping(url: &str, api_key: &str, model: String, timeout: Duration) -> (bool, Option<String>) {
    let body = serde_json::json!({
        "model": model,
        "messages": [{ "role": "user", "content": "ping" }],
        "max_tokens": 1,
    });

    let request = shared_client()
        .post(url)
        .headers(bearer_headers(api_key))
        .json(&body)
        .send();

    let resp = match tokio::time::timeout(timeout, request).await {
        Ok(Ok(resp)) => resp,
        Ok(Err(err)) => return (false, Some(err.to_string())),
        Err(_) => {
            return (
                false,
                Some(format!("timed out after {}s", timeout.as_secs())),
            )
        }
    };

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return (false, Some(format!("HTTP {}: {}", status.as_u16(), text)));
    }

    (true, None)
}
