//! Normalizes raw model replies into a `GenerationResponse`.
//!
//! Step 1 scans for the first balanced `{...}` span that parses as a JSON
//! object. Step 2, used only when no such span exists, reads the reply line
//! by line. Neither step can fail.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::generation::models::{
    truncate_chars, CopyContent, GenerationResponse, DEFAULT_CONSISTENCY_SCORE,
};

const MAX_SUGGESTIONS: usize = 3;

/// Used when the reply carries no suggestions of its own.
pub const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Consider adjusting the tone to better match your brand voice",
    "Add more specific details to make the content more engaging",
    "Review the call-to-action for clarity and effectiveness",
];

static CHARACTER_COUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)character count[:\s]*(\d+)").expect("valid regex"));
static CONSISTENCY_SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)voice consistency score[:\s]*(\d+)").expect("valid regex"));
static SUGGESTION_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+\.|[-*•])\s*").expect("valid regex"));

fn fallback_suggestions() -> Vec<String> {
    FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}

/// Parses a raw model reply. Plain content is capped at `character_limit`
/// characters; structured content passes through untouched.
pub fn parse_response(raw: &str, character_limit: usize) -> GenerationResponse {
    match find_json_object(raw) {
        Some(object) => from_json(object, raw, character_limit),
        None => {
            debug!("No JSON object in model reply, using line heuristics");
            from_lines(raw, character_limit)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Step 1: JSON
// ────────────────────────────────────────────────────────────────────────────

/// Byte length of the balanced object starting at `text[0] == '{'`, if any.
/// Braces inside string literals do not count.
fn balanced_object_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// First balanced span that parses as a JSON object. Each `{` is tried in
/// turn, so prose like "use {braces}" ahead of the payload is skipped.
fn find_json_object(text: &str) -> Option<Map<String, Value>> {
    text.char_indices()
        .filter(|&(_, ch)| ch == '{')
        .find_map(|(start, _)| {
            let len = balanced_object_len(&text[start..])?;
            match serde_json::from_str::<Value>(&text[start..start + len]) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            }
        })
}

fn non_negative_count(value: Option<&Value>) -> Option<usize> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .map(|n| n.round().max(0.0) as usize)
}

fn consistency_score(value: Option<&Value>) -> u8 {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(DEFAULT_CONSISTENCY_SCORE)
}

fn suggestions_from(value: Option<&Value>) -> Vec<String> {
    let suggestions: Vec<String> = value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if suggestions.is_empty() {
        fallback_suggestions()
    } else {
        suggestions
    }
}

fn from_json(mut object: Map<String, Value>, raw: &str, limit: usize) -> GenerationResponse {
    let voice_consistency_score = consistency_score(object.get("voiceConsistencyScore"));
    let suggestions = suggestions_from(object.get("suggestions"));
    let reported_count = non_negative_count(object.get("characterCount"));

    let text = match object.remove("content") {
        Some(Value::Object(structured)) => {
            return GenerationResponse {
                content: CopyContent::Structured(structured),
                character_count: reported_count.unwrap_or(0),
                voice_consistency_score,
                suggestions,
            };
        }
        Some(Value::String(text)) => text,
        None | Some(Value::Null) => raw.to_string(),
        Some(other) => other.to_string(),
    };

    let content = truncate_chars(&text, limit);
    let character_count = reported_count
        .unwrap_or_else(|| content.chars().count())
        .min(limit);

    GenerationResponse {
        content: CopyContent::Plain(content),
        character_count,
        voice_consistency_score,
        suggestions,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Step 2: line heuristics (lossy)
// ────────────────────────────────────────────────────────────────────────────

fn from_lines(raw: &str, limit: usize) -> GenerationResponse {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let first = lines.first().copied().unwrap_or_else(|| raw.trim());
    let content = truncate_chars(first, limit);

    let character_count = CHARACTER_COUNT_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .unwrap_or_else(|| content.chars().count())
        .min(limit);

    let voice_consistency_score = CONSISTENCY_SCORE_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .map(|score| score.min(100) as u8)
        .unwrap_or(DEFAULT_CONSISTENCY_SCORE);

    let suggestions: Vec<String> = lines
        .iter()
        .filter(|line| SUGGESTION_MARKER_RE.is_match(line))
        .map(|line| SUGGESTION_MARKER_RE.replace(line, "").trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect();

    GenerationResponse {
        content: CopyContent::Plain(content),
        character_count,
        voice_consistency_score,
        suggestions: if suggestions.is_empty() {
            fallback_suggestions()
        } else {
            suggestions
        },
    }
}
