//! In-process store used by unit and router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::answer::{UserAnswerRow, UserProgressRow};
use crate::models::meta::UserMetaRow;
use crate::models::question::{Category, NewQuestion, Question};
use crate::models::user::User;
use crate::profile::DEFAULT_ENTRIES;
use crate::store::{AnswerLedger, ProfileStore, ProgressSnapshots, QuestionStore, UserDirectory};

#[derive(Default)]
struct Inner {
    questions: Vec<Question>,
    answers: Vec<UserAnswerRow>,
    progress: HashMap<String, UserProgressRow>,
    /// Kept in write order so prefix listings match `ORDER BY updated_at`.
    meta: Vec<UserMetaRow>,
    users: Vec<User>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions(questions: &[(Category, &str)]) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock().unwrap();
            let base = Utc::now();
            inner.questions = questions
                .iter()
                .enumerate()
                .map(|(i, (category, text))| Question {
                    id: Uuid::new_v4(),
                    category: category.as_str().to_string(),
                    text: text.to_string(),
                    created_at: base + Duration::milliseconds(i as i64),
                })
                .collect();
        }
        store
    }

    pub fn add_user(&self, name: &str, email: &str) {
        self.inner.lock().unwrap().users.push(User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        });
    }

    pub fn question_ids(&self) -> Vec<Uuid> {
        self.inner
            .lock()
            .unwrap()
            .questions
            .iter()
            .map(|q| q.id)
            .collect()
    }

    pub fn meta_keys(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .meta
            .iter()
            .map(|m| m.key.clone())
            .collect()
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn list_questions(
        &self,
        category: Option<Category>,
        limit: Option<u32>,
    ) -> Result<Vec<Question>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .questions
            .iter()
            .filter(|q| category.map_or(true, |c| q.category == c.as_str()))
            .take(limit.map_or(usize::MAX, |l| l as usize))
            .cloned()
            .collect())
    }

    async fn get_question(&self, id: Uuid) -> Result<Option<Question>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn count_questions(&self) -> Result<i64, AppError> {
        Ok(self.inner.lock().unwrap().questions.len() as i64)
    }

    async fn replace_all_questions(&self, questions: &[NewQuestion]) -> Result<usize, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let base = Utc::now();
        inner.questions = questions
            .iter()
            .enumerate()
            .map(|(i, q)| Question {
                id: Uuid::new_v4(),
                category: q.category.as_str().to_string(),
                text: q.text.clone(),
                created_at: base + Duration::milliseconds(i as i64),
            })
            .collect();
        Ok(questions.len())
    }
}

#[async_trait]
impl AnswerLedger for MemoryStore {
    async fn upsert_answer(
        &self,
        session_id: &str,
        question_id: Uuid,
        category: &str,
        answer_text: &str,
    ) -> Result<UserAnswerRow, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let row = UserAnswerRow {
            session_id: session_id.to_string(),
            question_id,
            category: category.to_string(),
            answer_text: answer_text.to_string(),
            is_saved: true,
            updated_at: Utc::now(),
        };
        inner
            .answers
            .retain(|a| !(a.session_id == session_id && a.question_id == question_id));
        inner.answers.push(row.clone());
        Ok(row)
    }

    async fn get_answer(
        &self,
        session_id: &str,
        question_id: Uuid,
    ) -> Result<Option<UserAnswerRow>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .answers
            .iter()
            .find(|a| a.session_id == session_id && a.question_id == question_id)
            .cloned())
    }

    async fn list_answers(
        &self,
        session_id: &str,
        category: Option<Category>,
    ) -> Result<Vec<UserAnswerRow>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .answers
            .iter()
            .filter(|a| a.session_id == session_id)
            .filter(|a| category.map_or(true, |c| a.category == c.as_str()))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProgressSnapshots for MemoryStore {
    async fn upsert_snapshot(
        &self,
        session_id: &str,
        total_questions: i32,
        answered_questions: i32,
        categories_practiced: &[String],
    ) -> Result<UserProgressRow, AppError> {
        let row = UserProgressRow {
            session_id: session_id.to_string(),
            total_questions,
            answered_questions,
            categories_practiced: categories_practiced.to_vec(),
            last_activity: Utc::now(),
        };
        self.inner
            .lock()
            .unwrap()
            .progress
            .insert(session_id.to_string(), row.clone());
        Ok(row)
    }

    async fn get_snapshot(&self, session_id: &str) -> Result<Option<UserProgressRow>, AppError> {
        Ok(self.inner.lock().unwrap().progress.get(session_id).cloned())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_value(&self, key: &str) -> Result<Option<String>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .meta
            .iter()
            .find(|m| m.key == key)
            .map(|m| m.value.clone()))
    }

    async fn set_value(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.meta.retain(|m| m.key != key);
        inner.meta.push(UserMetaRow {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: Utc::now(),
        });
        Ok(())
    }

    async fn delete_key(&self, key: &str) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.meta.len();
        inner.meta.retain(|m| m.key != key);
        Ok(inner.meta.len() < before)
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<UserMetaRow>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .meta
            .iter()
            .filter(|m| m.key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn clear_all(&self) -> Result<(), AppError> {
        self.inner.lock().unwrap().meta.clear();
        for (key, value) in DEFAULT_ENTRIES {
            self.set_value(key, value).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.inner.lock().unwrap().users.clone())
    }
}
