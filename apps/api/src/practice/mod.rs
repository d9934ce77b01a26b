//! Practice flow: suggested answers per (session, question), saving them, and
//! moving through the question list.

pub mod handlers;

use std::sync::Arc;

use dashmap::DashMap;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::answers::save_answer;
use crate::errors::AppError;
use crate::inference::coaching::{personalized_answer, suggest_answer, PersonalizedAnswerInput};
use crate::llm_client::TextGenerator;
use crate::models::answer::UserAnswerRow;
use crate::profile;
use crate::store::Store;

/// Last suggestion shown for each (session, question). Cleared whenever the
/// question set is replaced.
#[derive(Clone, Default)]
pub struct SuggestionCache {
    entries: Arc<DashMap<(String, Uuid), String>>,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, session_id: &str, question_id: Uuid) -> Option<String> {
        self.entries
            .get(&(session_id.to_string(), question_id))
            .map(|entry| entry.value().clone())
    }

    pub fn insert(&self, session_id: &str, question_id: Uuid, text: String) {
        self.entries
            .insert((session_id.to_string(), question_id), text);
    }

    pub fn remove(&self, session_id: &str, question_id: Uuid) {
        self.entries.remove(&(session_id.to_string(), question_id));
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    /// The session's saved answer, shown instead of generating.
    Saved,
    Personalized,
    Generic,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub question_id: Uuid,
    pub suggested_answer: String,
    pub source: SuggestionSource,
}

#[derive(Debug, Clone, Copy)]
pub struct SuggestionRequest<'a> {
    pub session_id: &'a str,
    pub question_id: Uuid,
    /// Use the stored résumé and experiences when a résumé exists.
    pub personalized: bool,
    /// Ignore a saved answer and generate a fresh suggestion.
    pub regenerate: bool,
}

/// Produces the suggestion to show for a question.
///
/// A saved answer wins unless `regenerate` is set. Otherwise any cached
/// suggestion is dropped and a new one generated, personalized only when asked
/// for and a résumé is on file.
pub async fn load_suggestion<S: Store + ?Sized>(
    store: &S,
    llm: &dyn TextGenerator,
    cache: &SuggestionCache,
    request: &SuggestionRequest<'_>,
) -> Result<Suggestion, AppError> {
    let SuggestionRequest {
        session_id,
        question_id,
        personalized,
        regenerate,
    } = *request;

    let question = store
        .get_question(question_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    if !regenerate {
        if let Some(saved) = store.get_answer(session_id, question_id).await? {
            cache.insert(session_id, question_id, saved.answer_text.clone());
            return Ok(Suggestion {
                question_id,
                suggested_answer: saved.answer_text,
                source: SuggestionSource::Saved,
            });
        }
    }

    cache.remove(session_id, question_id);

    let has_resume = profile::get_value(store, profile::RESUME_CONTENT)
        .await?
        .is_some();
    let (suggested_answer, source) = if personalized && has_resume {
        let personal_context = profile::combined_context(store).await?;
        let text = personalized_answer(
            llm,
            &PersonalizedAnswerInput {
                question: &question.text,
                category: &question.category,
                personal_context: &personal_context,
                draft: "",
            },
        )
        .await?;
        (text, SuggestionSource::Personalized)
    } else {
        (
            suggest_answer(llm, &question.text).await?,
            SuggestionSource::Generic,
        )
    };

    cache.insert(session_id, question_id, suggested_answer.clone());
    debug!("Generated {source:?} suggestion for question {question_id}");
    Ok(Suggestion {
        question_id,
        suggested_answer,
        source,
    })
}

/// Saves the suggestion currently shown. 400 when nothing has been loaded.
pub async fn save_suggested<S: Store + ?Sized>(
    store: &S,
    cache: &SuggestionCache,
    session_id: &str,
    question_id: Uuid,
) -> Result<UserAnswerRow, AppError> {
    let suggested = cache.get(session_id, question_id).ok_or_else(|| {
        AppError::Validation("No suggested answer loaded for this question".to_string())
    })?;
    let row = save_answer(store, session_id, question_id, &suggested).await?;
    info!("Saved suggested answer for question {question_id}");
    Ok(row)
}

/// Saves the user's own text and makes it the shown suggestion.
pub async fn save_own<S: Store + ?Sized>(
    store: &S,
    cache: &SuggestionCache,
    session_id: &str,
    question_id: Uuid,
    answer_text: &str,
) -> Result<UserAnswerRow, AppError> {
    let row = save_answer(store, session_id, question_id, answer_text).await?;
    cache.insert(session_id, question_id, row.answer_text.clone());
    Ok(row)
}

/// Index after `current`, wrapping to the start. Out-of-range positions also
/// wrap. `None` for an empty list.
pub fn next_index(current: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(current.checked_add(1).filter(|next| *next < len).unwrap_or(0))
}

/// Uniformly random index. `None` for an empty list.
pub fn random_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    (len > 0).then(|| rng.gen_range(0..len))
}
