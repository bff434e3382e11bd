use anyhow::{Context, Result};

use crate::llm_client::{
    LlmConfig, DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_api_url: std::env::var("LLM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_max_tokens: parse_env("LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)
                .context("LLM_MAX_TOKENS must be a positive integer")?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
                .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Provider settings handed to the generation client at construction.
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            api_key: self.anthropic_api_key.clone(),
            api_url: self.llm_api_url.clone(),
            model: self.llm_model.clone(),
            max_tokens: self.llm_max_tokens,
            timeout_secs: self.llm_timeout_secs,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.trim().parse::<T>()?),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_config_copies_provider_settings() {
        let config = Config {
            anthropic_api_key: "sk-test".to_string(),
            llm_api_url: "http://localhost:4010/v1/messages".to_string(),
            llm_model: "claude-test".to_string(),
            llm_max_tokens: 1024,
            llm_timeout_secs: 30,
            port: 8080,
            rust_log: "debug".to_string(),
        };

        let llm = config.llm_config();
        assert_eq!(llm.api_key, "sk-test");
        assert_eq!(llm.api_url, "http://localhost:4010/v1/messages");
        assert_eq!(llm.model, "claude-test");
        assert_eq!(llm.max_tokens, 1024);
        assert_eq!(llm.timeout_secs, 30);
    }

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let value: u16 = parse_env("SETLIFE_TEST_UNSET_PORT_VAR", 9090).unwrap();
        assert_eq!(value, 9090);
    }
}
