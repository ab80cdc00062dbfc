use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// How a non-success status from the upstream API reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamErrors {
    /// Reply with the upstream status and its `error.message`.
    #[default]
    Forward,
    /// Log the upstream body and reply with a generic 500.
    Mask,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub model: String,
    /// Name of the environment variable holding the upstream key.
    pub api_key_env: String,
    pub upstream_errors: UpstreamErrors,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            upstream_errors: UpstreamErrors::default(),
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Reads the key on every call; an empty value counts as missing.
    pub fn api_key(&self) -> Option<String> {
        usable_key(std::env::var(&self.api_key_env).ok())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn usable_key(value: Option<String>) -> Option<String> {
    value.filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.api_base, "https://generativelanguage.googleapis.com");
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.upstream_errors, UpstreamErrors::Forward);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "upstream_errors: mask\ntimeout_secs: 30").unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.upstream_errors, UpstreamErrors::Mask);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.model, "gemini-pro");
    }

    #[test]
    fn test_unknown_error_mode_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "upstream_errors: swallow").unwrap();

        assert!(Config::from_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_missing_key_variable() {
        let config = Config {
            api_key_env: "GEMINI_PROXY_CONFIG_TEST_UNSET".to_string(),
            ..Config::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        assert_eq!(usable_key(Some(String::new())), None);
        assert_eq!(usable_key(None), None);
        assert_eq!(usable_key(Some("abc".to_string())).as_deref(), Some("abc"));
    }
}
