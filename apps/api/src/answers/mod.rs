//! Saved practice answers and the progress derived from them.

pub mod handlers;
pub mod progress;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::answer::UserAnswerRow;
use crate::store::Store;

/// Session used when a client does not send one.
pub const DEFAULT_SESSION_ID: &str = "default_session";

/// Parses a client-supplied question id. Anything unparseable cannot name a
/// stored question, so it is reported the same way as an unknown id.
pub fn parse_question_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound("Question not found".to_string()))
}

/// Upserts the session's answer to a question and refreshes its progress snapshot.
///
/// The answer's category is copied from the question as it is now.
pub async fn save_answer<S: Store + ?Sized>(
    store: &S,
    session_id: &str,
    question_id: Uuid,
    answer_text: &str,
) -> Result<UserAnswerRow, AppError> {
    if answer_text.trim().is_empty() {
        return Err(AppError::Validation("answerText must not be empty".to_string()));
    }
    let question = store
        .get_question(question_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    let row = store
        .upsert_answer(session_id, question_id, &question.category, answer_text)
        .await?;
    progress::refresh_progress(store, session_id).await?;

    info!("Saved answer for question {question_id} in session {session_id}");
    Ok(row)
}
