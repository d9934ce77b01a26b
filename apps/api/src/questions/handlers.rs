//! Axum route handlers for the question API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::inference::coaching::suggest_answer;
use crate::inference::handlers::SuggestedAnswerResponse;
use crate::models::question::{Category, NewQuestion, Question};
use crate::questions::{parse_limit, replace_questions};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListQuestionsQuery {
    pub category: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InsertQuestionItem {
    pub category: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InsertQuestionsRequest {
    pub questions: Option<Vec<InsertQuestionItem>>,
}

#[derive(Debug, Serialize)]
pub struct InsertQuestionsResponse {
    pub success: bool,
    pub count: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/questions?category=&limit=
pub async fn handle_list_questions(
    State(state): State<AppState>,
    Query(params): Query<ListQuestionsQuery>,
) -> Result<Json<Vec<Question>>, AppError> {
    let category = Category::parse_filter(params.category.as_deref())
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let limit = parse_limit(params.limit.as_deref())?;

    let questions = state.store.list_questions(category, limit).await?;
    Ok(Json(questions))
}

/// POST /api/questions/:id/suggested-answer
///
/// The question is looked up before anything else, so an unknown id is a 404
/// with no upstream call.
pub async fn handle_suggested_answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuggestedAnswerResponse>, AppError> {
    let not_found = || AppError::NotFound("Question not found".to_string());
    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let question = state.store.get_question(id).await?.ok_or_else(not_found)?;

    let suggested_answer = suggest_answer(state.llm.as_ref(), &question.text).await?;
    Ok(Json(SuggestedAnswerResponse { suggested_answer }))
}

/// POST /api/insert-questions
///
/// Replaces the GLOBAL question set. Categories are normalized on the way in.
pub async fn handle_insert_questions(
    State(state): State<AppState>,
    Json(request): Json<InsertQuestionsRequest>,
) -> Result<Json<InsertQuestionsResponse>, AppError> {
    let items = request
        .questions
        .ok_or_else(|| AppError::Validation("questions array is required".to_string()))?;

    let questions = items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let text = item
                .text
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    AppError::Validation(format!("questions[{idx}].text is required"))
                })?;
            Ok(NewQuestion {
                category: Category::normalize(item.category.as_deref().unwrap_or_default()),
                text,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let count = replace_questions(state.store.as_ref(), &state.suggestions, &questions).await?;
    Ok(Json(InsertQuestionsResponse {
        success: true,
        count,
    }))
}
