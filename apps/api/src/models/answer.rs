use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One saved answer. Unique per (session_id, question_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswerRow {
    pub session_id: String,
    pub question_id: Uuid,
    /// Copied from the question when the answer was written.
    pub category: String,
    pub answer_text: String,
    pub is_saved: bool,
    pub updated_at: DateTime<Utc>,
}

/// Persisted progress snapshot for a session. Last write wins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProgressRow {
    pub session_id: String,
    pub total_questions: i32,
    pub answered_questions: i32,
    pub categories_practiced: Vec<String>,
    pub last_activity: DateTime<Utc>,
}
