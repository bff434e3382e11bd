/// LLM Client — the single point of entry for all text-generation calls in SetLife.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// Stages depend on the `TextGenerator` trait; `LlmClient` is the production
/// implementation backed by the Anthropic Messages API.
///
/// One request per call. There is no retry loop: a failed call surfaces as an
/// `LlmError` and the calling stage turns it into its failure sentinel.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Provider settings. Built once from `Config` and handed to the client
/// constructor; nothing about the provider lives in global state.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    /// Messages endpoint; overridable for proxies and local mocks.
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

/// Text-in / text-out generation boundary used by every pipeline stage.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// The production generation client. Cheap to clone; the inner `reqwest::Client`
/// is reference counted.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Makes a single call to the Messages API, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: parse_api_error_message(body),
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, JSON_ONLY_SYSTEM).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of an Anthropic error body, falling back to the raw body.
fn parse_api_error_message(body: String) -> String {
    serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new(LlmConfig {
            api_key: "sk-test".to_string(),
            api_url: format!("{}/v1/messages", server.uri()),
            model: "claude-test".to_string(),
            max_tokens: 256,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_response_text_picks_first_text_block() {
        let json = r#"{
            "content": [
                {"type": "tool_use", "text": null},
                {"type": "text", "text": "{\"name\": \"Ada\"}"}
            ],
            "usage": {"input_tokens": 12, "output_tokens": 7}
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("{\"name\": \"Ada\"}"));
        assert_eq!(response.usage.output_tokens, 7);
    }

    #[test]
    fn test_response_text_none_without_text_block() {
        let json = r#"{"content": [], "usage": {"input_tokens": 1, "output_tokens": 0}}"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_api_error_message_is_extracted_from_body() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(parse_api_error_message(body.to_string()), "Overloaded");
    }

    #[test]
    fn test_api_error_message_falls_back_to_raw_body() {
        assert_eq!(
            parse_api_error_message("gateway timeout".to_string()),
            "gateway timeout"
        );
    }

    #[test]
    fn test_client_builds_from_config() {
        let client = LlmClient::new(LlmConfig {
            api_key: "sk-test".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            model: "claude-test".to_string(),
            max_tokens: 512,
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.model(), "claude-test");
    }

    #[tokio::test]
    async fn test_generate_returns_text_block_from_messages_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-test"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "{\"name\": \"Ada\"}"}],
                "usage": {"input_tokens": 20, "output_tokens": 6}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).generate("profile please").await.unwrap();
        assert_eq!(text, "{\"name\": \"Ada\"}");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["model"], "claude-test");
        assert_eq!(body["system"], JSON_ONLY_SYSTEM);
        assert_eq!(body["messages"][0]["content"], "profile please");
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_api_error_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_json(json!({
                "type": "error",
                "error": {"type": "overloaded_error", "message": "Overloaded"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).generate("p").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 529);
                assert_eq!(message, "Overloaded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reply_without_text_block_is_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "tool_use"}],
                "usage": {"input_tokens": 3, "output_tokens": 0}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("p").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_scripted_generator_replays_in_order_and_records_prompts() {
        let generator = testing::ScriptedGenerator::new(vec![Ok("first"), Err(529)]);

        assert_eq!(generator.generate("p1").await.unwrap(), "first");
        let err = generator.generate("p2").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 529, .. }));
        assert!(matches!(
            generator.generate("p3").await.unwrap_err(),
            LlmError::EmptyContent
        ));
        assert_eq!(generator.prompts(), vec!["p1", "p2", "p3"]);
    }
}
