//! Axum route handlers for résumé onboarding.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::documents::extract_text;
use crate::documents::handlers::read_file_field;
use crate::errors::AppError;
use crate::onboarding::{remove_resume, run_onboarding, OnboardingOutcome, ResumeUpload};
use crate::profile::handlers::SuccessResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    pub resume_content: Option<String>,
    pub filename: Option<String>,
}

/// POST /api/onboarding/resume
///
/// Résumé text already extracted by the client.
pub async fn handle_onboard_text(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<OnboardingOutcome>, AppError> {
    let content = request
        .resume_content
        .ok_or_else(|| AppError::Validation("resumeContent is required".to_string()))?;
    let upload = ResumeUpload {
        content,
        filename: request.filename.unwrap_or_default(),
    };

    let outcome = run_onboarding(
        state.store.as_ref(),
        state.llm.as_ref(),
        &state.suggestions,
        &upload,
    )
    .await?;
    Ok(Json(outcome))
}

/// POST /api/onboarding/upload (multipart, field `file`)
pub async fn handle_onboard_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OnboardingOutcome>, AppError> {
    let file = read_file_field(&mut multipart).await?;
    let content = extract_text(file.kind, file.data).await?;
    let upload = ResumeUpload {
        content,
        filename: file.filename,
    };

    let outcome = run_onboarding(
        state.store.as_ref(),
        state.llm.as_ref(),
        &state.suggestions,
        &upload,
    )
    .await?;
    Ok(Json(outcome))
}

/// DELETE /api/onboarding/resume
pub async fn handle_remove_resume(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse>, AppError> {
    remove_resume(state.store.as_ref()).await?;
    Ok(Json(SuccessResponse { success: true }))
}
