//! Key lifecycle endpoints

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ApiKeyRequest, Json, KeyEntryResponse, LoginRequest, LoginResponse,
    RegisterRequest, RegisterResponse, SuccessResponse,
};

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let username = request.username.unwrap_or_default();
    let time = request.time.unwrap_or_default();
    debug!(username = %username, time = %time, "Registering API key");

    let issued = state.key_store.issue(&username, &time).await?;

    Ok(Json(issued.into()))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let api_key = request.api_key.unwrap_or_default();
    let hwid = request.hwid.unwrap_or_default();

    let outcome = state
        .key_store
        .login(&api_key, &hwid)
        .await
        .map_err(ApiError::for_login)?;

    Ok(Json(outcome.into()))
}

/// GET /list
pub async fn list_keys(State(state): State<AppState>) -> Json<Vec<KeyEntryResponse>> {
    let keys = state.key_store.list().await;
    debug!(count = keys.len(), "Listing API keys");

    Json(keys.into_iter().map(KeyEntryResponse::from).collect())
}

/// POST /hwid-reset
pub async fn reset_hwid(
    State(state): State<AppState>,
    Json(request): Json<ApiKeyRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let api_key = request.api_key.unwrap_or_default();

    state.key_store.reset_hwid(&api_key).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /key
pub async fn delete_key(
    State(state): State<AppState>,
    Json(request): Json<ApiKeyRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let api_key = request.api_key.unwrap_or_default();

    state.key_store.delete(&api_key).await?;

    Ok(Json(SuccessResponse::ok()))
}
