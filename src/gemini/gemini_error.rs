use serde::{Deserialize, Serialize};

/// Error envelope returned by the Gemini API on non-success statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiErrorResponse {
    pub error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiErrorDetail {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub status: Option<String>,
}

impl GeminiErrorResponse {
    pub fn message(&self) -> Option<&str> {
        self.error.as_ref()?.message.as_deref().filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_from_google_error_body() {
        let body = json!({
            "error": {
                "code": 429,
                "message": "quota exceeded",
                "status": "RESOURCE_EXHAUSTED"
            }
        });
        let parsed: GeminiErrorResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.message(), Some("quota exceeded"));
        assert_eq!(parsed.error.unwrap().status.as_deref(), Some("RESOURCE_EXHAUSTED"));
    }

    #[test]
    fn test_message_missing() {
        let parsed: GeminiErrorResponse = serde_json::from_value(json!({ "error": { "code": 500 } })).unwrap();
        assert_eq!(parsed.message(), None);

        let parsed: GeminiErrorResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed.message(), None);
    }
}
