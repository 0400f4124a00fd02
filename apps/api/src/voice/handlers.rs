//! Axum route handlers for the Voice API.

use axum::{extract::rejection::JsonRejection, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::models::FieldIssue;
use crate::voice::analyzer::{analyze_consistency, VoiceAnalysis};
use crate::voice::matrix::{presets, VoiceMatrix};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicePreset {
    pub name: &'static str,
    pub voice_matrix: VoiceMatrix,
}

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub presets: Vec<VoicePreset>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub voice_matrix: VoiceMatrix,
}

/// Echo of what was analyzed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEcho {
    pub content: String,
    pub voice_matrix: VoiceMatrix,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub result: VoiceAnalysis,
    pub analysis: AnalysisEcho,
}

/// GET /api/v1/voice/presets
pub async fn handle_presets() -> Json<PresetsResponse> {
    let presets = presets()
        .into_iter()
        .map(|(name, voice_matrix)| VoicePreset { name, voice_matrix })
        .collect();
    Json(PresetsResponse { presets })
}

/// POST /api/v1/voice/analyze
///
/// Scores how closely `content` matches the target voice. Runs locally.
pub async fn handle_analyze(
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload?;

    let mut issues = Vec::new();
    if request.content.trim().is_empty() {
        issues.push(FieldIssue::new("content", "Content is required"));
    }
    for axis in request.voice_matrix.out_of_range() {
        issues.push(FieldIssue::new(
            format!("voiceMatrix.{}", axis.key()),
            "Must be between -1 and 1",
        ));
    }
    if !issues.is_empty() {
        return Err(AppError::InvalidRequest(issues));
    }

    let result = analyze_consistency(&request.content, &request.voice_matrix);
    Ok(Json(AnalyzeResponse {
        result,
        analysis: AnalysisEcho {
            content: request.content,
            voice_matrix: request.voice_matrix,
            timestamp: Utc::now(),
        },
    }))
}
