pub mod gemini_candidate;
pub mod gemini_content;
pub mod gemini_error;
pub mod gemini_generation_config;
pub mod gemini_part;
pub mod gemini_request;
pub mod gemini_response;

pub use gemini_candidate::GeminiCandidate;
pub use gemini_content::GeminiContent;
pub use gemini_error::GeminiErrorResponse;
pub use gemini_generation_config::GeminiGenerationConfig;
pub use gemini_part::GeminiPart;
pub use gemini_request::GeminiRequest;
pub use gemini_response::GeminiResponse;
