use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Only the text part is modelled; other part kinds deserialize with `text: None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeminiPart {
    // Inbound prompts are forwarded untouched, so this is not narrowed to a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
}
