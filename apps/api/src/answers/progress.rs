use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::answer::UserProgressRow;
use crate::store::{AnswerLedger, ProgressSnapshots, QuestionStore};

/// Freshly computed practice progress for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Size of the global question set, not of the session's share of it.
    pub total_questions: i64,
    pub saved_answers: i64,
    /// Distinct, sorted.
    pub categories_covered: Vec<String>,
}

/// Reads the current counts. Writes nothing.
pub async fn compute_progress<S>(store: &S, session_id: &str) -> Result<Progress, AppError>
where
    S: QuestionStore + AnswerLedger + ?Sized,
{
    let total_questions = store.count_questions().await?;
    let answers = store.list_answers(session_id, None).await?;

    let mut categories_covered: Vec<String> =
        answers.iter().map(|a| a.category.clone()).collect();
    categories_covered.sort();
    categories_covered.dedup();

    Ok(Progress {
        total_questions,
        saved_answers: answers.len() as i64,
        categories_covered,
    })
}

/// Recomputes progress and overwrites the session's persisted snapshot.
pub async fn refresh_progress<S>(store: &S, session_id: &str) -> Result<UserProgressRow, AppError>
where
    S: QuestionStore + AnswerLedger + ProgressSnapshots + ?Sized,
{
    let progress = compute_progress(store, session_id).await?;
    let snapshot = store
        .upsert_snapshot(
            session_id,
            clamp_count(progress.total_questions),
            clamp_count(progress.saved_answers),
            &progress.categories_covered,
        )
        .await?;
    debug!(
        "Progress snapshot for {session_id}: {}/{} answered",
        snapshot.answered_questions, snapshot.total_questions
    );
    Ok(snapshot)
}

fn clamp_count(count: i64) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Category;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_progress_counts_session_answers_against_global_total() {
        let store = MemoryStore::with_questions(&[
            (Category::Leadership, "q1"),
            (Category::Teamwork, "q2"),
            (Category::Leadership, "q3"),
            (Category::Adaptability, "q4"),
        ]);
        let ids = store.question_ids();
        store
            .upsert_answer("s1", ids[0], "Leadership", "a")
            .await
            .unwrap();
        store
            .upsert_answer("s1", ids[2], "Leadership", "b")
            .await
            .unwrap();
        store
            .upsert_answer("s1", ids[1], "Teamwork", "c")
            .await
            .unwrap();
        store
            .upsert_answer("other", ids[3], "Adaptability", "d")
            .await
            .unwrap();

        let progress = compute_progress(&store, "s1").await.unwrap();
        assert_eq!(
            progress,
            Progress {
                total_questions: 4,
                saved_answers: 3,
                categories_covered: vec!["Leadership".to_string(), "Teamwork".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn test_compute_is_a_pure_read() {
        let store = MemoryStore::with_questions(&[(Category::Leadership, "q1")]);
        compute_progress(&store, "s1").await.unwrap();
        assert!(store.get_snapshot("s1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_refresh_overwrites_snapshot() {
        let store = MemoryStore::with_questions(&[
            (Category::Leadership, "q1"),
            (Category::Communication, "q2"),
        ]);
        let ids = store.question_ids();

        let first = refresh_progress(&store, "s1").await.unwrap();
        assert_eq!(first.answered_questions, 0);

        store
            .upsert_answer("s1", ids[1], "Communication", "answer")
            .await
            .unwrap();
        refresh_progress(&store, "s1").await.unwrap();

        let snapshot = store.get_snapshot("s1").await.unwrap().unwrap();
        assert_eq!(snapshot.total_questions, 2);
        assert_eq!(snapshot.answered_questions, 1);
        assert_eq!(snapshot.categories_practiced, vec!["Communication"]);
    }
}
