use crate::gemini::{GeminiContent, GeminiGenerationConfig, GeminiPart};
use crate::models::PromptRequest;
use serde::{Deserialize, Serialize};

/// Body of a `models/{model}:generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

impl From<PromptRequest> for GeminiRequest {
    fn from(request: PromptRequest) -> Self {
        let generation_config = request.wants_json().then(GeminiGenerationConfig::string_array);
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: request.prompt }],
            }],
            generation_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn payload(body: Value) -> Value {
        let request: PromptRequest = serde_json::from_value(body).unwrap();
        serde_json::to_value(GeminiRequest::from(request)).unwrap()
    }

    #[test]
    fn test_plain_prompt() {
        assert_eq!(
            payload(json!({ "prompt": "hello" })),
            json!({ "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }] })
        );
    }

    #[test]
    fn test_json_flag_adds_generation_config() {
        let value = payload(json!({ "prompt": "list three colours", "isJson": true }));
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            value["generationConfig"]["responseSchema"],
            json!({ "type": "ARRAY", "items": { "type": "STRING" } })
        );
    }

    #[test]
    fn test_false_flag_omits_generation_config() {
        let value = payload(json!({ "prompt": "hi", "isJson": false }));
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_prompt_is_not_validated() {
        // absent prompt -> part without text
        assert_eq!(
            payload(json!({})),
            json!({ "contents": [{ "role": "user", "parts": [{}] }] })
        );
        // non-string prompt is passed through for upstream to reject
        assert_eq!(payload(json!({ "prompt": 42 }))["contents"][0]["parts"][0]["text"], 42);
    }

    #[test]
    fn test_identical_requests_build_identical_payloads() {
        let body = json!({ "prompt": "same", "isJson": true });
        assert_eq!(payload(body.clone()), payload(body));
    }
}
