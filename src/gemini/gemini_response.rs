use crate::gemini::GeminiCandidate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiResponse {
    pub candidates: Option<Vec<GeminiCandidate>>,
    #[serde(rename = "modelVersion")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate, trimmed.
    ///
    /// Returns `None` when any level of `candidates[0].content.parts[0].text`
    /// is missing, is not a string, or is empty.
    pub fn first_text(&self) -> Option<&str> {
        let text = self
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_ref()?
            .as_str()?;
        if text.is_empty() {
            return None;
        }
        Some(text.trim())
    }

    pub fn first_finish_reason(&self) -> Option<&str> {
        self.candidates.as_ref()?.first()?.finish_reason.as_deref()
    }
}
