use crate::config::Config;
use crate::gemini::GeminiRequest;
use crate::request_id::RequestId;
use reqwest::header::HeaderValue;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

/// Thin wrapper over a shared `reqwest::Client` that knows the Gemini URL layout.
#[derive(Debug)]
pub struct LlmClient {
    http_client: Arc<reqwest::Client>,
}

impl LlmClient {
    pub fn new(http_client: Arc<reqwest::Client>) -> Self {
        Self { http_client }
    }

    fn build_target_url(config: &Config) -> String {
        let path = format!("v1beta/models/{}:generateContent", config.model);
        let api_base = &config.api_base;
        if api_base.ends_with('/') { format!("{}{}", api_base, path) } else { format!("{}/{}", api_base, path) }
    }

    pub fn generate_content(
        &self,
        request: &GeminiRequest,
        config: &Config,
        api_key: &str,
        request_id: &RequestId,
    ) -> impl Future<Output = Result<reqwest::Response, reqwest::Error>> {
        let target_url = Self::build_target_url(config);

        let mut target_request = self
            .http_client
            .post(&target_url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json");

        if let Ok(val) = HeaderValue::from_str(&request_id.0) {
            target_request = target_request.header("x-request-id", val);
        }

        if let Some(timeout) = config.timeout() {
            target_request = target_request.timeout(timeout);
        }

        // The key travels in the query string, so only the bare URL is logged.
        info!("Forwarding request to: {}", target_url);
        debug!(
            "request body: {}",
            serde_json::to_string(request).unwrap_or_default()
        );
        let pending = target_request.json(request).send();
        // reqwest errors print their URL, which carries the key
        async move { pending.await.map_err(reqwest::Error::without_url) }
    }
}
