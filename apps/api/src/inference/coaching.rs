//! Answer coaching: suggested STAR answers and structured feedback.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::inference::prompts::{
    FEEDBACK_TEMPLATE, PERSONALIZED_ANSWER_TEMPLATE, SUGGESTED_ANSWER_TEMPLATE,
};
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, STAR_FORMAT};
use crate::llm_client::{generate_json, TextGenerator};

/// One scored feedback dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackScore {
    pub score: u8,
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub structure: FeedbackScore,
    pub clarity: FeedbackScore,
    pub tone: FeedbackScore,
    pub impact: FeedbackScore,
    pub overall: String,
    pub improved_example: String,
}

/// Inputs for a personalized answer.
pub struct PersonalizedAnswerInput<'a> {
    pub question: &'a str,
    pub category: &'a str,
    pub personal_context: &'a str,
    pub draft: &'a str,
}

pub fn build_suggested_answer_prompt(question: &str) -> String {
    SUGGESTED_ANSWER_TEMPLATE
        .replace("{star_format}", STAR_FORMAT)
        .replace("{question}", question)
}

pub fn build_personalized_answer_prompt(input: &PersonalizedAnswerInput<'_>) -> String {
    let draft = if input.draft.trim().is_empty() {
        "(none)"
    } else {
        input.draft
    };
    PERSONALIZED_ANSWER_TEMPLATE
        .replace("{star_format}", STAR_FORMAT)
        .replace("{category}", input.category)
        .replace("{question}", input.question)
        .replace("{draft}", draft)
        .replace("{personal_context}", input.personal_context)
}

pub fn build_feedback_prompt(question: &str, category: &str, answer: &str) -> String {
    FEEDBACK_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{category}", category)
        .replace("{question}", question)
        .replace("{answer}", answer)
}

/// Generic STAR answer for a question, returned as free text.
pub async fn suggest_answer(llm: &dyn TextGenerator, question: &str) -> Result<String, AppError> {
    llm.generate(&build_suggested_answer_prompt(question))
        .await
        .map_err(|e| AppError::llm("Failed to generate suggested answer", e))
}

/// STAR answer grounded in the candidate's résumé and experiences.
pub async fn personalized_answer(
    llm: &dyn TextGenerator,
    input: &PersonalizedAnswerInput<'_>,
) -> Result<String, AppError> {
    llm.generate(&build_personalized_answer_prompt(input))
        .await
        .map_err(|e| AppError::llm("Failed to generate personalized answer", e))
}

/// Scores an answer. A reply that is not the expected JSON is a generic LLM error.
pub async fn analyze_answer(
    llm: &dyn TextGenerator,
    question: &str,
    category: &str,
    answer: &str,
) -> Result<FeedbackResponse, AppError> {
    generate_json(llm, &build_feedback_prompt(question, category, answer))
        .await
        .map_err(|e| AppError::llm("Failed to analyze answer", e))
}
