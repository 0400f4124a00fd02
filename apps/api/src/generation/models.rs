//! Request / response shapes for copy generation.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::voice::matrix::VoiceMatrix;

/// Applied when a request carries no `characterLimit`.
pub const DEFAULT_CHARACTER_LIMIT: usize = 280;

/// Default consistency score when the model does not report one.
pub const DEFAULT_CONSISTENCY_SCORE: u8 = 85;

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

/// A single generation request as it arrives over HTTP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: Option<String>,
    /// Legacy alias for `prompt`.
    pub content: Option<String>,
    #[serde(default)]
    pub channel: String,
    pub voice_matrix: Option<VoiceMatrix>,
    /// Legacy seven-axis sliders. Accepted on the wire, never used for generation.
    pub voice_settings: Option<HashMap<String, f64>>,
    pub brand_guidelines: Option<String>,
    pub voice_samples: Option<String>,
    pub character_limit: Option<i64>,
    pub mode: Option<String>,
    pub specifications: Option<Value>,
    pub example_text: Option<String>,
    pub zodiac_sign: Option<String>,
    pub zodiac_signs: Option<Vec<String>>,
    pub content_type: Option<String>,
}

/// One field-level validation problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl GenerationRequest {
    /// The text to write copy for: `prompt`, falling back to the legacy `content` field.
    pub fn prompt_text(&self) -> &str {
        non_blank(&self.prompt)
            .or_else(|| non_blank(&self.content))
            .unwrap_or("")
    }

    pub fn character_limit(&self) -> usize {
        self.character_limit
            .filter(|&l| l > 0)
            .map(|l| l as usize)
            .unwrap_or(DEFAULT_CHARACTER_LIMIT)
    }

    /// The voice matrix, or the all-neutral matrix when none was sent.
    pub fn voice(&self) -> VoiceMatrix {
        self.voice_matrix.unwrap_or_default()
    }

    pub fn mode(&self) -> GenerationMode {
        GenerationMode::parse(self.mode.as_deref())
    }

    pub fn content_type(&self) -> &str {
        non_blank(&self.content_type).unwrap_or("general")
    }

    /// Specifications parsed leniently: each unreadable field falls back to its
    /// own default.
    pub fn specifications(&self) -> Specifications {
        self.specifications
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    /// Selected zodiac sign ids: `zodiacSigns`, else `zodiacSign`, else `aries`.
    pub fn zodiac_signs(&self) -> Vec<String> {
        let many: Vec<String> = self
            .zodiac_signs
            .iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect();
        if !many.is_empty() {
            return many;
        }
        match non_blank(&self.zodiac_sign) {
            Some(sign) => vec![sign.to_string()],
            None => vec!["aries".to_string()],
        }
    }

    /// Checks the request shape. An empty vec means valid.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        if self.prompt_text().is_empty() {
            issues.push(FieldIssue::new("prompt", "Prompt is required"));
        }
        if self.channel.trim().is_empty() {
            issues.push(FieldIssue::new("channel", "Channel is required"));
        }
        if let Some(matrix) = &self.voice_matrix {
            for axis in matrix.out_of_range() {
                issues.push(FieldIssue::new(
                    format!("voiceMatrix.{}", axis.key()),
                    "Must be between -1 and 1",
                ));
            }
        }
        if matches!(self.character_limit, Some(l) if l <= 0) {
            issues.push(FieldIssue::new(
                "characterLimit",
                "Must be a positive number",
            ));
        }

        issues
    }
}

/// Output mode requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Standard,
    EmailOptimized,
    Horoscope,
}

impl GenerationMode {
    pub fn parse(mode: Option<&str>) -> Self {
        match mode.map(|m| m.trim().to_ascii_lowercase()).as_deref() {
            Some("email-optimized") => GenerationMode::EmailOptimized,
            Some("horoscope") => GenerationMode::Horoscope,
            _ => GenerationMode::Standard,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Channel specifications (email-optimized mode)
// ────────────────────────────────────────────────────────────────────────────

/// Strings pass through, numbers are rendered as text, anything else is
/// treated as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A nested spec block that fails to parse becomes its default.
fn lenient_block<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Recommended / maximum guidance for one field. Every value is free text
/// (e.g. "30-50 characters").
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FieldSpec {
    #[serde(deserialize_with = "lenient_text")]
    pub recommended: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub max: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub ios: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub android: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BodyContentSpec {
    #[serde(deserialize_with = "lenient_text")]
    pub headline: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub opening: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub main: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub closing: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaSpec {
    #[serde(deserialize_with = "lenient_text")]
    pub button_text: Option<String>,
}

/// Channel-specific limits sent by the email-optimized UI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Specifications {
    #[serde(deserialize_with = "lenient_block")]
    pub subject_line: FieldSpec,
    #[serde(deserialize_with = "lenient_block")]
    pub preheader: FieldSpec,
    #[serde(deserialize_with = "lenient_block")]
    pub body_content: BodyContentSpec,
    #[serde(deserialize_with = "lenient_block")]
    pub cta: CtaSpec,
    #[serde(deserialize_with = "lenient_block")]
    pub push_title: FieldSpec,
    #[serde(deserialize_with = "lenient_block")]
    pub push_body: FieldSpec,
    #[serde(deserialize_with = "lenient_block")]
    pub caption: FieldSpec,
    #[serde(deserialize_with = "lenient_block")]
    pub hashtags: FieldSpec,
    #[serde(deserialize_with = "lenient_block")]
    pub hook: FieldSpec,
    #[serde(deserialize_with = "lenient_block")]
    pub stories: FieldSpec,
}

// ────────────────────────────────────────────────────────────────────────────
// Response
// ────────────────────────────────────────────────────────────────────────────

/// Generated copy: plain text, or a structured multi-field payload
/// (email + push, horoscope sets).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CopyContent {
    Plain(String),
    Structured(Map<String, Value>),
}

impl CopyContent {
    #[cfg(test)]
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            CopyContent::Plain(text) => Some(text),
            CopyContent::Structured(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub content: CopyContent,
    pub character_count: usize,
    pub voice_consistency_score: u8,
    pub suggestions: Vec<String>,
}

impl GenerationResponse {
    /// Placeholder for a slot whose generation could not run.
    pub fn error_slot(message: &str) -> Self {
        Self {
            content: CopyContent::Plain(format!("Error: {message}")),
            character_count: 0,
            voice_consistency_score: 0,
            suggestions: Vec::new(),
        }
    }
}

/// Truncates to at most `limit` characters. Never appends an ellipsis.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
