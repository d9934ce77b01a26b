//! Axum route handlers for the generative-text endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::inference::coaching::{
    analyze_answer, personalized_answer, FeedbackResponse, PersonalizedAnswerInput,
};
use crate::inference::confidence::score_confidence;
use crate::inference::questions::generate_questions;
use crate::inference::role::{infer_role, InferredRole};
use crate::models::question::NewQuestion;
use crate::profile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferRoleRequest {
    pub resume_content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferRoleResponse {
    pub inferred_role: InferredRole,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceRequest {
    pub resume_content: Option<String>,
    pub inferred_role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfidenceResponse {
    /// Always within [0, 1].
    pub confidence: f64,
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeAnswerRequest {
    pub question: Option<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub category: String,
    pub personal_context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedAnswerResponse {
    pub suggested_answer: String,
}

fn require_text(value: Option<String>, message: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/infer-role
pub async fn handle_infer_role(
    State(state): State<AppState>,
    Json(request): Json<InferRoleRequest>,
) -> Result<Json<InferRoleResponse>, AppError> {
    let resume_content = require_text(request.resume_content, "resumeContent is required")?;
    let inferred_role = infer_role(state.llm.as_ref(), &resume_content).await?;
    Ok(Json(InferRoleResponse { inferred_role }))
}

/// POST /api/confidence-level
///
/// 422 with the raw reply when the model answers outside 0–100.
pub async fn handle_confidence_level(
    State(state): State<AppState>,
    Json(request): Json<ConfidenceRequest>,
) -> Result<Json<ConfidenceResponse>, AppError> {
    let message = "resumeContent and inferredRole are required";
    let resume_content = require_text(request.resume_content, message)?;
    let inferred_role = require_text(request.inferred_role, message)?;

    let confidence = score_confidence(state.llm.as_ref(), &resume_content, &inferred_role).await?;
    Ok(Json(ConfidenceResponse { confidence }))
}

/// POST /api/generate-questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let role = require_text(request.role, "role is required")?;
    let questions = generate_questions(state.llm.as_ref(), &role).await?;
    Ok(Json(GenerateQuestionsResponse { questions }))
}

/// POST /api/generate-personalized-answer
///
/// Falls back to the stored résumé + experiences when no context is sent.
pub async fn handle_personalized_answer(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeAnswerRequest>,
) -> Result<Json<SuggestedAnswerResponse>, AppError> {
    let question = require_text(request.question, "question is required")?;

    let personal_context = match request.personal_context.filter(|c| !c.trim().is_empty()) {
        Some(context) => context,
        None => profile::combined_context(state.store.as_ref()).await?,
    };

    let suggested_answer = personalized_answer(
        state.llm.as_ref(),
        &PersonalizedAnswerInput {
            question: &question,
            category: &request.category,
            personal_context: &personal_context,
            draft: &request.answer,
        },
    )
    .await?;
    Ok(Json(SuggestedAnswerResponse { suggested_answer }))
}

/// POST /api/analyze-answer
pub async fn handle_analyze_answer(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeAnswerRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let question = require_text(request.question, "question is required")?;
    if request.answer.trim().is_empty() {
        return Err(AppError::Validation("answer is required".to_string()));
    }

    let feedback = analyze_answer(
        state.llm.as_ref(),
        &question,
        &request.category,
        &request.answer,
    )
    .await?;
    Ok(Json(feedback))
}
