//! Axum route handlers for the Generation API.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::auth::MaybeAuthUser;
use crate::errors::AppError;
use crate::generation::batch::{generate_batch, BatchRequest, BatchResponse};
use crate::generation::channels::{Channel, CHANNELS};
use crate::generation::client::CopyGenerator;
use crate::generation::models::{GenerationRequest, GenerationResponse};
use crate::llm_client::LlmClient;
use crate::state::AppState;
use crate::users::repository;

const API_KEY_REQUIRED: &str = "API key required. Please add your Gemini API key in Settings.";

#[derive(Debug, Serialize)]
pub struct ChannelsResponse {
    pub channels: &'static [Channel],
}

/// Picks the generator for this caller.
///
/// Signed-in users generate with their stored key. Without a key they get a 400
/// unless anonymous demo is enabled, in which case they fall back to demo copy.
/// Anonymous callers are rejected with 401 unless anonymous demo is enabled.
async fn generator_for(state: &AppState, user: MaybeAuthUser) -> Result<CopyGenerator, AppError> {
    let allow_demo = state.config.allow_anonymous_demo;

    let Some(user) = user.0 else {
        if allow_demo {
            return Ok(CopyGenerator::demo());
        }
        return Err(AppError::Unauthorized);
    };

    let api_key = repository::get_api_key(&state.db, user.id).await?;
    if allow_demo {
        return Ok(CopyGenerator::from_credential(
            state.http.clone(),
            api_key.as_deref(),
        ));
    }

    let api_key = api_key.ok_or_else(|| AppError::Credential(API_KEY_REQUIRED.to_string()))?;
    let client = LlmClient::new(state.http.clone(), &api_key)?;
    Ok(CopyGenerator::new(Arc::new(client)))
}

/// GET /api/v1/channels
pub async fn handle_channels() -> Json<ChannelsResponse> {
    Json(ChannelsResponse { channels: CHANNELS })
}

/// POST /api/v1/copy/generate
///
/// Returns the generator's output verbatim. Model failures never surface
/// here; they come back as demo copy.
pub async fn handle_generate(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    // Caller first: anonymous requests get 401 before any body checks.
    let generator = generator_for(&state, user).await?;

    let Json(request) = payload?;
    let issues = request.validate();
    if !issues.is_empty() {
        return Err(AppError::InvalidRequest(issues));
    }

    info!(
        "Generating copy: channel={}, mode={:?}, demo={}",
        request.channel,
        request.mode(),
        generator.is_demo()
    );

    Ok(Json(generator.generate(&request).await))
}

/// POST /api/v1/copy/generate/batch
///
/// One generation per (variant, channel) pair, run concurrently.
pub async fn handle_generate_batch(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, AppError> {
    let generator = generator_for(&state, user).await?;

    let Json(request) = payload?;
    let issues = request.validate();
    if !issues.is_empty() {
        return Err(AppError::InvalidRequest(issues));
    }

    Ok(Json(generate_batch(&generator, &request).await))
}
