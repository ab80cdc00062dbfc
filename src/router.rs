use crate::config::{Config, UpstreamErrors};
use crate::gemini::{GeminiErrorResponse, GeminiRequest, GeminiResponse};
use crate::llm_client::LlmClient;
use crate::models::{
    ErrorMessage, PromptRequest, PromptResponse, API_KEY_NOT_CONFIGURED, METHOD_NOT_ALLOWED,
    SERVER_ERROR, UPSTREAM_ERROR,
};
use crate::request_id::{inject_request_id, RequestId};
use anyhow::{anyhow, bail, Context, Result};
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Extension, Json, Router,
};
use bytes::Bytes;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

/// Yields the upstream key for one request.
pub type ApiKeySource = Arc<dyn Fn() -> Option<String> + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm_client: Arc<LlmClient>,
    pub api_key: ApiKeySource,
}

impl AppState {
    /// State whose key is read from the configured environment variable on each request.
    pub fn new(config: Config, llm_client: LlmClient) -> Self {
        let config = Arc::new(config);
        let key_config = config.clone();
        Self {
            config,
            llm_client: Arc::new(llm_client),
            api_key: Arc::new(move || key_config.api_key()),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // `any` so that the handler, not axum, answers wrong methods
        .route("/api/gemini", any(gemini_proxy))
        .route("/health", get(|| async { "OK" }))
        .layer(axum::middleware::from_fn(inject_request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[axum_macros::debug_handler]
pub async fn gemini_proxy(
    State(state): State<AppState>,
    method: Method,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> Response {
    if method != Method::POST {
        info!("Rejecting {} request", method);
        return ErrorMessage::reply(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED);
    }

    let Some(api_key) = (state.api_key)() else {
        error!("API key is missing: ${} is not set", state.config.api_key_env);
        return ErrorMessage::reply(StatusCode::INTERNAL_SERVER_ERROR, API_KEY_NOT_CONFIGURED);
    };

    match forward_prompt(&state, &api_key, &request_id, &body).await {
        Ok(response) => response,
        Err(e) => {
            error!("Error in proxy handler: {:#}", e);
            ErrorMessage::reply(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
        }
    }
}

/// Everything after the method and key gates. Any `Err` becomes the generic 500.
async fn forward_prompt(
    state: &AppState,
    api_key: &str,
    request_id: &RequestId,
    body: &[u8],
) -> Result<Response> {
    let prompt = PromptRequest::from_body(body).context("Failed to parse request body")?;
    let payload = GeminiRequest::from(prompt);

    let response = state
        .llm_client
        .generate_content(&payload, &state.config, api_key, request_id)
        .await
        .context("Failed to send request to Gemini API")?;

    let status = response.status();
    if !status.is_success() {
        return match state.config.upstream_errors {
            UpstreamErrors::Forward => Ok(forward_upstream_error(response).await),
            UpstreamErrors::Mask => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                error!("Gemini API error: {}", error_text);
                Err(anyhow!("Gemini API responded with status: {}", status))
            }
        };
    }

    let result: GeminiResponse = response
        .json()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to parse Gemini response")?;
    debug!("Gemini model version: {:?}", result.model_version);

    match result.first_text() {
        Some(text) => {
            let body = PromptResponse { response: text.to_string() };
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        None => bail!(
            "Could not extract text from Gemini response (finish reason: {})",
            result.first_finish_reason().unwrap_or("none")
        ),
    }
}

async fn forward_upstream_error(response: reqwest::Response) -> Response {
    let status = response.status();
    let message = match response.json::<GeminiErrorResponse>().await {
        Ok(body) => {
            if let Some(detail) = &body.error {
                debug!("Gemini error status: {:?} code: {:?}", detail.status, detail.code);
            }
            body.message().map(str::to_string)
        }
        Err(e) => {
            warn!("Gemini error body is not JSON: {}", e.without_url());
            None
        }
    }
    .unwrap_or_else(|| UPSTREAM_ERROR.to_string());

    error!("Gemini API error ({}): {}", status, message);
    ErrorMessage::reply(status, message)
}
