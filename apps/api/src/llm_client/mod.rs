//! LLM Client: the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All model interactions MUST go through this module.
//!
//! A client is built per request from the caller's own key. There is no
//! process-wide credential.
//!
//! Model: gemini-2.0-flash-exp (hardcoded, not configurable)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all generation calls.
pub const MODEL: &str = "gemini-2.0-flash-exp";
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Keys that ship in sample configs and docs. Treated as "no key".
pub const PLACEHOLDER_KEYS: &[&str] = &[
    "test-key",
    "demo-key",
    "YOUR_ACTUAL_GEMINI_API_KEY_HERE",
    "your-gemini-api-key-here",
];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited (status 429): {message}")]
    RateLimited { message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("API key is required. Please sign in and add your Gemini API key in Settings.")]
    MissingApiKey,

    #[error("Invalid API key. Please check your Gemini API key in Settings.")]
    InvalidApiKey,
}

/// Cheap static check: non-blank and not one of the known placeholders.
pub fn is_usable_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !PLACEHOLDER_KEYS.contains(&key)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiTextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl LlmResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

fn api_error_message(body: String) -> String {
    serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Anything that can turn a prompt into raw model text.
/// `LlmClient` is the production implementation; tests substitute fakes.
#[async_trait]
pub trait CopyModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Gemini client bound to one user's API key.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    /// Validates the key and binds it to the shared HTTP client.
    /// Fails with `MissingApiKey` for a blank key and `InvalidApiKey` for a placeholder.
    pub fn new(client: Client, api_key: &str) -> Result<Self, LlmError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }
        if !is_usable_key(api_key) {
            return Err(LlmError::InvalidApiKey);
        }
        Ok(Self {
            client,
            api_key: api_key.to_string(),
        })
    }

    /// Makes a single call to `generateContent`. No retries: a 429 surfaces as
    /// `LlmError::RateLimited` so the caller can pick its own fallback.
    pub async fn call(&self, prompt: &str, max_output_tokens: u32) -> Result<LlmResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiTextPart { text: prompt }],
            }],
            generation_config: GenerationConfig { max_output_tokens },
        };

        let response = self
            .client
            .post(format!("{GEMINI_API_BASE}/{MODEL}:generateContent"))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API rate limited the request");
            return Err(LlmError::RateLimited {
                message: api_error_message(body),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={:?}, output_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(llm_response)
    }

    /// Checks the key against the provider with the smallest possible generation.
    pub async fn verify(&self) -> Result<(), LlmError> {
        self.call(prompts::KEY_CHECK_PROMPT, 1).await.map(|_| ())
    }
}

#[async_trait]
impl CopyModel for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, MAX_OUTPUT_TOKENS).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_keys_are_not_usable() {
        for key in PLACEHOLDER_KEYS {
            assert!(!is_usable_key(key), "{key} must be rejected");
        }
        assert!(!is_usable_key(""));
        assert!(!is_usable_key("   "));
        assert!(is_usable_key("AIzaSyRealLookingKey"));
    }

    #[test]
    fn test_new_rejects_blank_key_as_missing() {
        let result = LlmClient::new(Client::new(), "  ");
        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }

    #[test]
    fn test_new_rejects_placeholder_as_invalid() {
        let result = LlmClient::new(Client::new(), "your-gemini-api-key-here");
        assert!(matches!(result, Err(LlmError::InvalidApiKey)));
    }

    #[test]
    fn test_new_accepts_real_key() {
        assert!(LlmClient::new(Client::new(), "AIzaSyRealLookingKey").is_ok());
    }

    #[test]
    fn test_credential_errors_mention_api_key() {
        assert!(LlmError::MissingApiKey.to_string().contains("API key"));
        assert!(LlmError::InvalidApiKey.to_string().contains("API key"));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "{\"content\": "}, {"text": "\"Hi\"}"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"content\": \"Hi\"}"));
        assert_eq!(
            response.usage_metadata.unwrap().candidates_token_count,
            Some(4)
        );
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: LlmResponse = serde_json::from_str(r#"{"promptFeedback": {}}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_api_error_message_extracts_provider_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body.to_string()), "API key not valid");
        assert_eq!(api_error_message("plain".to_string()), "plain");
    }
}
