//! Axum route handlers for API key management.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{AuthUser, MaybeAuthUser};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::state::AppState;
use crate::users::repository;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRequest {
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveApiKeyResponse {
    pub success: bool,
    pub valid: bool,
}

#[derive(Debug, Serialize)]
pub struct TestApiKeyResponse {
    pub valid: bool,
}

/// Runs the smallest possible generation with `api_key`.
async fn key_is_valid(http: &Client, api_key: &str) -> bool {
    let client = match LlmClient::new(http.clone(), api_key) {
        Ok(client) => client,
        Err(_) => return false,
    };
    match client.verify().await {
        Ok(()) => true,
        Err(e) => {
            warn!("API key check failed: {}", e);
            false
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/user/api-key
///
/// Anonymous callers get `{"apiKey": null}`.
pub async fn handle_get_api_key(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> Result<Json<ApiKeyResponse>, AppError> {
    let api_key = match user {
        Some(user) => repository::get_api_key(&state.db, user.id).await?,
        None => None,
    };
    Ok(Json(ApiKeyResponse { api_key }))
}

/// POST /api/v1/user/api-key
///
/// Tests the key against the provider and saves it only when it works.
/// A rejected key is not an HTTP error: the response reports `valid: false`.
pub async fn handle_save_api_key(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ApiKeyRequest>, JsonRejection>,
) -> Result<Json<SaveApiKeyResponse>, AppError> {
    let Json(request) = payload?;
    let api_key = request.api_key.trim();
    if api_key.is_empty() {
        return Err(AppError::Validation("API key is required".to_string()));
    }

    if !key_is_valid(&state.http, api_key).await {
        return Ok(Json(SaveApiKeyResponse {
            success: false,
            valid: false,
        }));
    }

    repository::save_api_key(&state.db, user.id, api_key).await?;
    info!("Saved API key for user {}", user.id);

    Ok(Json(SaveApiKeyResponse {
        success: true,
        valid: true,
    }))
}

/// DELETE /api/v1/user/api-key
pub async fn handle_delete_api_key(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<StatusCode, AppError> {
    if repository::clear_api_key(&state.db, user.id).await? {
        info!("Cleared API key for user {}", user.id);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/test-api-key
///
/// Checks a key without storing it.
pub async fn handle_test_api_key(
    State(state): State<AppState>,
    payload: Result<Json<ApiKeyRequest>, JsonRejection>,
) -> Result<Json<TestApiKeyResponse>, AppError> {
    let Json(request) = payload?;
    let valid = key_is_valid(&state.http, request.api_key.trim()).await;
    Ok(Json(TestApiKeyResponse { valid }))
}
