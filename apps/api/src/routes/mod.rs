pub mod health;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::answers::handlers as answers;
use crate::documents::{handlers as documents, MAX_UPLOAD_BYTES};
use crate::inference::handlers as inference;
use crate::onboarding::handlers as onboarding;
use crate::practice::handlers as practice;
use crate::profile::handlers as profile;
use crate::questions::handlers as questions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Questions
        .route("/questions", get(questions::handle_list_questions))
        .route(
            "/questions/:id/suggested-answer",
            post(questions::handle_suggested_answer),
        )
        .route("/insert-questions", post(questions::handle_insert_questions))
        // Generative text
        .route("/generate-questions", post(inference::handle_generate_questions))
        .route("/infer-role", post(inference::handle_infer_role))
        .route("/confidence-level", post(inference::handle_confidence_level))
        .route(
            "/generate-personalized-answer",
            post(inference::handle_personalized_answer),
        )
        .route("/analyze-answer", post(inference::handle_analyze_answer))
        // Answers and progress
        .route(
            "/user-answers",
            get(answers::handle_list_answers).post(answers::handle_save_answer),
        )
        .route("/progress/:session_id", get(answers::handle_get_progress))
        .route(
            "/progress/:session_id/refresh",
            post(answers::handle_refresh_progress),
        )
        // Documents
        .route("/parse-document", post(documents::handle_parse_document))
        // Profile
        .route("/user-meta", post(profile::handle_set_value))
        .route("/user-meta/generic/:key", get(profile::handle_get_value))
        .route("/user-meta/experiences", get(profile::handle_list_experiences))
        .route("/user-meta/experience", post(profile::handle_add_experience))
        .route(
            "/user-meta/experience/:key",
            delete(profile::handle_remove_experience),
        )
        .route(
            "/user-meta/combined-context",
            get(profile::handle_combined_context),
        )
        .route(
            "/user-meta/onboarding-completed",
            get(profile::handle_onboarding_completed),
        )
        .route(
            "/user-meta/complete-onboarding",
            post(profile::handle_complete_onboarding),
        )
        .route("/user-meta/clear", delete(profile::handle_clear))
        // Onboarding
        .route(
            "/onboarding/resume",
            post(onboarding::handle_onboard_text).delete(onboarding::handle_remove_resume),
        )
        .route("/onboarding/upload", post(onboarding::handle_onboard_upload))
        // Practice
        .route("/practice/suggestion", post(practice::handle_load_suggestion))
        .route("/practice/save-suggested", post(practice::handle_save_suggested))
        .route("/practice/save-answer", post(practice::handle_save_own))
        .route("/practice/next", get(practice::handle_next_question))
        // Legacy
        .route("/users", get(users::handle_list_users))
}
