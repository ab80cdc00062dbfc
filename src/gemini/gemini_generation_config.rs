use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeminiGenerationConfig {
    #[serde(rename = "responseMimeType")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "responseSchema")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<GeminiSchema>,
}

/// Subset of the OpenAPI schema object accepted as `responseSchema`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiSchema {
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<GeminiSchema>>,
}

impl GeminiGenerationConfig {
    /// Constrains the model output to a JSON array of strings.
    pub fn string_array() -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(GeminiSchema {
                r#type: "ARRAY".to_string(),
                items: Some(Box::new(GeminiSchema { r#type: "STRING".to_string(), items: None })),
            }),
        }
    }
}
