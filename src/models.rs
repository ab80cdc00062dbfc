use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const API_KEY_NOT_CONFIGURED: &str = "API key is not configured.";
pub const SERVER_ERROR: &str = "An error occurred on the server.";
pub const UPSTREAM_ERROR: &str = "The upstream API returned an error.";

/// Body accepted on `/api/gemini`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<Value>,
    #[serde(rename = "isJson")]
    #[serde(default)]
    pub is_json: Option<Value>,
}

impl PromptRequest {
    /// Decodes a request body. Only a JSON object is accepted; serde would
    /// otherwise also take `["prompt", true]` as positional fields.
    pub fn from_body(body: &[u8]) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            anyhow::bail!("request body is not a JSON object");
        }
        Ok(serde_json::from_value(value)?)
    }

    /// `isJson` is honoured with JavaScript truthiness so loosely typed
    /// clients (`1`, `"yes"`) behave as they always have.
    pub fn wants_json(&self) -> bool {
        match &self.is_json {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptResponse {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn reply(status: StatusCode, message: impl Into<String>) -> Response {
        (status, Json(ErrorMessage { message: message.into() })).into_response()
    }
}
