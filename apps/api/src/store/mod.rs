//! Persistence seams.
//!
//! Each concern gets its own trait so domain code can ask for exactly what it
//! touches. `PgStore` implements all of them; `AppState` carries it as
//! `Arc<dyn Store>`.
//!
//! No method opens a transaction. Multi-statement operations
//! (`replace_all_questions`, `clear_all`) rely on per-statement atomicity only.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::answer::{UserAnswerRow, UserProgressRow};
use crate::models::meta::UserMetaRow;
use crate::models::question::{Category, NewQuestion, Question};
use crate::models::user::User;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Questions in creation order, optionally filtered and capped.
    async fn list_questions(
        &self,
        category: Option<Category>,
        limit: Option<u32>,
    ) -> Result<Vec<Question>, AppError>;

    async fn get_question(&self, id: Uuid) -> Result<Option<Question>, AppError>;

    async fn count_questions(&self) -> Result<i64, AppError>;

    /// Deletes every question, then inserts `questions` in order.
    /// A failure midway leaves the table in an indeterminate state.
    async fn replace_all_questions(&self, questions: &[NewQuestion]) -> Result<usize, AppError>;
}

#[async_trait]
pub trait AnswerLedger: Send + Sync {
    /// Insert or update-in-place keyed by (session, question). Always marks saved.
    async fn upsert_answer(
        &self,
        session_id: &str,
        question_id: Uuid,
        category: &str,
        answer_text: &str,
    ) -> Result<UserAnswerRow, AppError>;

    async fn get_answer(
        &self,
        session_id: &str,
        question_id: Uuid,
    ) -> Result<Option<UserAnswerRow>, AppError>;

    async fn list_answers(
        &self,
        session_id: &str,
        category: Option<Category>,
    ) -> Result<Vec<UserAnswerRow>, AppError>;
}

#[async_trait]
pub trait ProgressSnapshots: Send + Sync {
    /// Overwrites any prior snapshot for the session.
    async fn upsert_snapshot(
        &self,
        session_id: &str,
        total_questions: i32,
        answered_questions: i32,
        categories_practiced: &[String],
    ) -> Result<UserProgressRow, AppError>;

    async fn get_snapshot(&self, session_id: &str) -> Result<Option<UserProgressRow>, AppError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Raw stored value. An empty string is returned as stored.
    async fn get_value(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn set_value(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Returns whether a row was removed.
    async fn delete_key(&self, key: &str) -> Result<bool, AppError>;

    /// Rows whose key starts with `prefix`, oldest write first.
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<UserMetaRow>, AppError>;

    /// Deletes every key, then reseeds `profile::DEFAULT_ENTRIES`.
    async fn clear_all(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
}

/// Everything the HTTP layer needs from persistence.
pub trait Store: QuestionStore + AnswerLedger + ProgressSnapshots + ProfileStore + UserDirectory {}

impl<T> Store for T where
    T: QuestionStore + AnswerLedger + ProgressSnapshots + ProfileStore + UserDirectory
{
}
