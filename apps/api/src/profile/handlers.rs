//! Axum route handlers for the profile key/value API.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::profile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ValueResponse {
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetValueRequest {
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ExperienceEntry {
    pub key: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ExperiencesResponse {
    /// key → content, for clients that look experiences up by key.
    pub experiences: BTreeMap<String, String>,
    /// The same experiences in the order they were added.
    pub entries: Vec<ExperienceEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AddExperienceRequest {
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddExperienceResponse {
    pub success: bool,
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct CombinedContextResponse {
    pub combined: String,
}

#[derive(Debug, Serialize)]
pub struct OnboardingStatusResponse {
    pub completed: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/user-meta/generic/:key
pub async fn handle_get_value(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ValueResponse>, AppError> {
    let value = profile::get_value(state.store.as_ref(), &key).await?;
    Ok(Json(ValueResponse { value }))
}

/// POST /api/user-meta
pub async fn handle_set_value(
    State(state): State<AppState>,
    Json(request): Json<SetValueRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let key = request
        .key
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| AppError::Validation("key is required".to_string()))?;

    state
        .store
        .set_value(&key, request.value.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/user-meta/experiences
pub async fn handle_list_experiences(
    State(state): State<AppState>,
) -> Result<Json<ExperiencesResponse>, AppError> {
    let listed = profile::list_experiences(state.store.as_ref()).await?;
    let experiences = listed.iter().cloned().collect();
    let entries = listed
        .into_iter()
        .map(|(key, content)| ExperienceEntry { key, content })
        .collect();
    Ok(Json(ExperiencesResponse {
        experiences,
        entries,
    }))
}

/// POST /api/user-meta/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
    Json(request): Json<AddExperienceRequest>,
) -> Result<Json<AddExperienceResponse>, AppError> {
    let content = request
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::Validation("content is required".to_string()))?;

    let key = profile::add_experience(state.store.as_ref(), &content).await?;
    Ok(Json(AddExperienceResponse { success: true, key }))
}

/// DELETE /api/user-meta/experience/:key
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let removed = profile::remove_experience(state.store.as_ref(), &key).await?;
    if removed {
        info!("Removed experience {key}");
    }
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/user-meta/combined-context
pub async fn handle_combined_context(
    State(state): State<AppState>,
) -> Result<Json<CombinedContextResponse>, AppError> {
    let combined = profile::combined_context(state.store.as_ref()).await?;
    Ok(Json(CombinedContextResponse { combined }))
}

/// GET /api/user-meta/onboarding-completed
pub async fn handle_onboarding_completed(
    State(state): State<AppState>,
) -> Result<Json<OnboardingStatusResponse>, AppError> {
    let completed = profile::onboarding_completed(state.store.as_ref()).await?;
    Ok(Json(OnboardingStatusResponse { completed }))
}

/// POST /api/user-meta/complete-onboarding
pub async fn handle_complete_onboarding(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse>, AppError> {
    profile::complete_onboarding(state.store.as_ref()).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/user-meta/clear
///
/// Destructive: every key is dropped and only the three defaults come back.
pub async fn handle_clear(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store.clear_all().await?;
    info!("User profile cleared");
    Ok(Json(SuccessResponse { success: true }))
}
