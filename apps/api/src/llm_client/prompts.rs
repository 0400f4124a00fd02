// Shared prompt fragments used across every generation mode.
// Mode-specific templates live in generation/prompts.rs.

/// Minimal prompt used to check that a key is accepted by the provider.
pub const KEY_CHECK_PROMPT: &str = "Test";

/// Header that introduces the JSON shape the model must answer with.
pub const RESPONSE_FORMAT_HEADER: &str = "RESPONSE FORMAT (JSON):";

/// Trailing metadata fields shared by every JSON response shape.
/// Appended after the `content` field of each format.
pub const RESPONSE_METADATA_FIELDS: &str = r#"  "characterCount": 123,
  "voiceConsistencyScore": 85,
  "suggestions": [
    "Suggestion 1",
    "Suggestion 2",
    "Suggestion 3"
  ]"#;

/// Closing instruction appended to every generation prompt.
pub const GENERATE_NOW: &str = "Generate the copy now:";
