use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::answer::{UserAnswerRow, UserProgressRow};
use crate::models::meta::UserMetaRow;
use crate::models::question::{Category, NewQuestion, Question};
use crate::models::user::User;
use crate::profile::DEFAULT_ENTRIES;
use crate::store::{AnswerLedger, ProfileStore, ProgressSnapshots, QuestionStore, UserDirectory};

/// PostgreSQL-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for PgStore {
    async fn list_questions(
        &self,
        category: Option<Category>,
        limit: Option<u32>,
    ) -> Result<Vec<Question>, AppError> {
        // LIMIT NULL is "no limit" in PostgreSQL.
        Ok(sqlx::query_as::<_, Question>(
            r#"
            SELECT id, category, text, created_at
            FROM questions
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY created_at ASC, seq ASC
            LIMIT $2
            "#,
        )
        .bind(category.map(|c| c.as_str()))
        .bind(limit.map(i64::from))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_question(&self, id: Uuid) -> Result<Option<Question>, AppError> {
        Ok(sqlx::query_as::<_, Question>(
            "SELECT id, category, text, created_at FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn count_questions(&self) -> Result<i64, AppError> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn replace_all_questions(&self, questions: &[NewQuestion]) -> Result<usize, AppError> {
        let deleted = sqlx::query("DELETE FROM questions")
            .execute(&self.pool)
            .await?
            .rows_affected();

        for (seq, question) in questions.iter().enumerate() {
            sqlx::query("INSERT INTO questions (id, category, text, seq) VALUES ($1, $2, $3, $4)")
                .bind(Uuid::new_v4())
                .bind(question.category.as_str())
                .bind(&question.text)
                .bind(seq as i32)
                .execute(&self.pool)
                .await?;
        }

        info!(
            "Replaced question set: deleted {deleted}, inserted {}",
            questions.len()
        );
        Ok(questions.len())
    }
}

#[async_trait]
impl AnswerLedger for PgStore {
    async fn upsert_answer(
        &self,
        session_id: &str,
        question_id: Uuid,
        category: &str,
        answer_text: &str,
    ) -> Result<UserAnswerRow, AppError> {
        Ok(sqlx::query_as::<_, UserAnswerRow>(
            r#"
            INSERT INTO user_answers
                (session_id, question_id, category, answer_text, is_saved, updated_at)
            VALUES ($1, $2, $3, $4, TRUE, NOW())
            ON CONFLICT (session_id, question_id) DO UPDATE SET
                category = EXCLUDED.category,
                answer_text = EXCLUDED.answer_text,
                is_saved = TRUE,
                updated_at = NOW()
            RETURNING session_id, question_id, category, answer_text, is_saved, updated_at
            "#,
        )
        .bind(session_id)
        .bind(question_id)
        .bind(category)
        .bind(answer_text)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_answer(
        &self,
        session_id: &str,
        question_id: Uuid,
    ) -> Result<Option<UserAnswerRow>, AppError> {
        Ok(sqlx::query_as::<_, UserAnswerRow>(
            r#"
            SELECT session_id, question_id, category, answer_text, is_saved, updated_at
            FROM user_answers
            WHERE session_id = $1 AND question_id = $2
            "#,
        )
        .bind(session_id)
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list_answers(
        &self,
        session_id: &str,
        category: Option<Category>,
    ) -> Result<Vec<UserAnswerRow>, AppError> {
        Ok(sqlx::query_as::<_, UserAnswerRow>(
            r#"
            SELECT session_id, question_id, category, answer_text, is_saved, updated_at
            FROM user_answers
            WHERE session_id = $1 AND ($2::text IS NULL OR category = $2)
            ORDER BY updated_at ASC
            "#,
        )
        .bind(session_id)
        .bind(category.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl ProgressSnapshots for PgStore {
    async fn upsert_snapshot(
        &self,
        session_id: &str,
        total_questions: i32,
        answered_questions: i32,
        categories_practiced: &[String],
    ) -> Result<UserProgressRow, AppError> {
        Ok(sqlx::query_as::<_, UserProgressRow>(
            r#"
            INSERT INTO user_progress
                (session_id, total_questions, answered_questions, categories_practiced, last_activity)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (session_id) DO UPDATE SET
                total_questions = EXCLUDED.total_questions,
                answered_questions = EXCLUDED.answered_questions,
                categories_practiced = EXCLUDED.categories_practiced,
                last_activity = NOW()
            RETURNING session_id, total_questions, answered_questions, categories_practiced, last_activity
            "#,
        )
        .bind(session_id)
        .bind(total_questions)
        .bind(answered_questions)
        .bind(categories_practiced)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_snapshot(&self, session_id: &str) -> Result<Option<UserProgressRow>, AppError> {
        Ok(sqlx::query_as::<_, UserProgressRow>(
            r#"
            SELECT session_id, total_questions, answered_questions, categories_practiced, last_activity
            FROM user_progress
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn get_value(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(
            sqlx::query_scalar::<_, String>("SELECT value FROM user_meta WHERE key = $1 LIMIT 1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn set_value(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_meta (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_key(&self, key: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_meta WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<UserMetaRow>, AppError> {
        // starts_with() rather than LIKE: '_' in prefixes is a LIKE wildcard.
        Ok(sqlx::query_as::<_, UserMetaRow>(
            r#"
            SELECT key, value, updated_at
            FROM user_meta
            WHERE starts_with(key, $1)
            ORDER BY updated_at ASC, key ASC
            "#,
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn clear_all(&self) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM user_meta")
            .execute(&self.pool)
            .await?
            .rows_affected();

        for (key, value) in DEFAULT_ENTRIES {
            self.set_value(key, value).await?;
        }

        info!("Cleared {deleted} profile keys and reseeded defaults");
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }
}
