//! Axum route handlers for saved answers and progress.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::answers::progress::{compute_progress, refresh_progress, Progress};
use crate::answers::{parse_question_id, save_answer, DEFAULT_SESSION_ID};
use crate::errors::AppError;
use crate::models::answer::{UserAnswerRow, UserProgressRow};
use crate::models::question::Category;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAnswersQuery {
    pub session_id: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAnswerRequest {
    pub session_id: Option<String>,
    pub question_id: Option<String>,
    pub answer_text: Option<String>,
}

fn session_or_default(session_id: Option<String>) -> String {
    session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string())
}

/// GET /api/user-answers?sessionId=&category=
pub async fn handle_list_answers(
    State(state): State<AppState>,
    Query(params): Query<ListAnswersQuery>,
) -> Result<Json<Vec<UserAnswerRow>>, AppError> {
    let category = Category::parse_filter(params.category.as_deref())
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let session_id = session_or_default(params.session_id);

    let answers = state.store.list_answers(&session_id, category).await?;
    Ok(Json(answers))
}

/// POST /api/user-answers
pub async fn handle_save_answer(
    State(state): State<AppState>,
    Json(request): Json<SaveAnswerRequest>,
) -> Result<Json<UserAnswerRow>, AppError> {
    let question_id = request
        .question_id
        .ok_or_else(|| AppError::Validation("questionId is required".to_string()))?;
    let question_id = parse_question_id(&question_id)?;
    let session_id = session_or_default(request.session_id);
    let answer_text = request.answer_text.unwrap_or_default();

    let row = save_answer(state.store.as_ref(), &session_id, question_id, &answer_text).await?;
    Ok(Json(row))
}

/// GET /api/progress/:session_id
///
/// Pure read. The snapshot table is only written by the refresh endpoint and by
/// answer saves.
pub async fn handle_get_progress(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Progress>, AppError> {
    let progress = compute_progress(state.store.as_ref(), &session_id).await?;
    Ok(Json(progress))
}

/// POST /api/progress/:session_id/refresh
pub async fn handle_refresh_progress(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<UserProgressRow>, AppError> {
    let snapshot = refresh_progress(state.store.as_ref(), &session_id).await?;
    Ok(Json(snapshot))
}
