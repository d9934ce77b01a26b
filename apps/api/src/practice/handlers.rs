//! Axum route handlers for the practice flow.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::answers::{parse_question_id, DEFAULT_SESSION_ID};
use crate::errors::AppError;
use crate::models::answer::UserAnswerRow;
use crate::models::question::{Category, Question};
use crate::practice::{
    load_suggestion, next_index, random_index, save_own, save_suggested, Suggestion,
    SuggestionRequest,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRequest {
    pub session_id: Option<String>,
    pub question_id: Option<String>,
    #[serde(default)]
    pub personalized: bool,
    #[serde(default)]
    pub regenerate: bool,
    pub answer_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextQuestionQuery {
    pub category: Option<String>,
    pub current: Option<usize>,
    /// `next` (default) or `random`.
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NextQuestionResponse {
    pub index: usize,
    pub question: Question,
}

impl PracticeRequest {
    fn session_id(&self) -> &str {
        self.session_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SESSION_ID)
    }

    fn question_id(&self) -> Result<uuid::Uuid, AppError> {
        let raw = self
            .question_id
            .as_deref()
            .ok_or_else(|| AppError::Validation("questionId is required".to_string()))?;
        parse_question_id(raw)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/practice/suggestion
pub async fn handle_load_suggestion(
    State(state): State<AppState>,
    Json(request): Json<PracticeRequest>,
) -> Result<Json<Suggestion>, AppError> {
    let question_id = request.question_id()?;
    let suggestion = load_suggestion(
        state.store.as_ref(),
        state.llm.as_ref(),
        &state.suggestions,
        &SuggestionRequest {
            session_id: request.session_id(),
            question_id,
            personalized: request.personalized,
            regenerate: request.regenerate,
        },
    )
    .await?;
    Ok(Json(suggestion))
}

/// POST /api/practice/save-suggested
pub async fn handle_save_suggested(
    State(state): State<AppState>,
    Json(request): Json<PracticeRequest>,
) -> Result<Json<UserAnswerRow>, AppError> {
    let question_id = request.question_id()?;
    let row = save_suggested(
        state.store.as_ref(),
        &state.suggestions,
        request.session_id(),
        question_id,
    )
    .await?;
    Ok(Json(row))
}

/// POST /api/practice/save-answer
pub async fn handle_save_own(
    State(state): State<AppState>,
    Json(request): Json<PracticeRequest>,
) -> Result<Json<UserAnswerRow>, AppError> {
    let question_id = request.question_id()?;
    let row = save_own(
        state.store.as_ref(),
        &state.suggestions,
        request.session_id(),
        question_id,
        request.answer_text.as_deref().unwrap_or_default(),
    )
    .await?;
    Ok(Json(row))
}

/// GET /api/practice/next?category=&current=&mode=
pub async fn handle_next_question(
    State(state): State<AppState>,
    Query(params): Query<NextQuestionQuery>,
) -> Result<Json<NextQuestionResponse>, AppError> {
    let category = Category::parse_filter(params.category.as_deref())
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let mut questions = state.store.list_questions(category, None).await?;

    let index = match params.mode.as_deref() {
        None | Some("next") => match params.current {
            Some(current) => next_index(current, questions.len()),
            None => (!questions.is_empty()).then_some(0),
        },
        Some("random") => random_index(&mut rand::thread_rng(), questions.len()),
        Some(other) => {
            return Err(AppError::Validation(format!(
                "mode must be 'next' or 'random', got '{other}'"
            )))
        }
    }
    .ok_or_else(|| AppError::NotFound("No questions available".to_string()))?;

    let question = questions.swap_remove(index);
    Ok(Json(NextQuestionResponse { index, question }))
}
