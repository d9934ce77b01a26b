//! Question set queries and the global wipe-and-replace.

pub mod handlers;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::question::NewQuestion;
use crate::practice::SuggestionCache;
use crate::store::QuestionStore;

/// Parses a `limit` query value. Absent means uncapped; it must otherwise be a
/// positive integer.
pub fn parse_limit(raw: Option<&str>) -> Result<Option<u32>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => match value.parse::<u32>() {
            Ok(limit) if limit > 0 => Ok(Some(limit)),
            _ => Err(AppError::Validation(format!(
                "limit must be a positive integer, got '{value}'"
            ))),
        },
    }
}

/// Replaces the global question set and forgets suggestions cached for the old one.
///
/// The set is shared by every session: one caller's replacement is what all
/// others see next.
pub async fn replace_questions<S: QuestionStore + ?Sized>(
    store: &S,
    suggestions: &SuggestionCache,
    questions: &[NewQuestion],
) -> Result<usize, AppError> {
    if questions.is_empty() {
        warn!("Replacing the question set with an empty list");
    }
    let count = store.replace_all_questions(questions).await?;
    suggestions.clear();
    info!("Question set replaced with {count} questions");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Category;
    use crate::store::memory::MemoryStore;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None).unwrap(), None);
        assert_eq!(parse_limit(Some("")).unwrap(), None);
        assert_eq!(parse_limit(Some("5")).unwrap(), Some(5));
        for bad in ["0", "-2", "ten", "3.5"] {
            assert!(matches!(parse_limit(Some(bad)), Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_category_filter_returns_only_matching_rows() {
        let store = MemoryStore::with_questions(&[
            (Category::Leadership, "L1"),
            (Category::Teamwork, "T1"),
            (Category::Leadership, "L2"),
            (Category::Communication, "C1"),
        ]);

        for category in Category::ALL {
            let rows = store.list_questions(Some(category), None).await.unwrap();
            assert!(rows.iter().all(|q| q.category == category.as_str()));
        }

        let leadership = store
            .list_questions(Some(Category::Leadership), None)
            .await
            .unwrap();
        assert_eq!(
            leadership.iter().map(|q| q.text.as_str()).collect::<Vec<_>>(),
            vec!["L1", "L2"]
        );
    }

    #[tokio::test]
    async fn test_limit_is_a_hard_cap_in_creation_order() {
        let store = MemoryStore::with_questions(&[
            (Category::Leadership, "first"),
            (Category::Teamwork, "second"),
            (Category::Adaptability, "third"),
        ]);
        let rows = store.list_questions(None, Some(2)).await.unwrap();
        assert_eq!(
            rows.iter().map(|q| q.text.as_str()).collect::<Vec<_>>(),
            vec!["first", "second"]
        );
    }

    #[tokio::test]
    async fn test_replace_questions_swaps_set_and_clears_cache() {
        let store = MemoryStore::with_questions(&[(Category::Leadership, "old")]);
        let old_id = store.question_ids()[0];
        let cache = SuggestionCache::new();
        cache.insert("s", old_id, "cached".to_string());

        let new = vec![
            NewQuestion {
                category: Category::Teamwork,
                text: "new one".to_string(),
            },
            NewQuestion {
                category: Category::Communication,
                text: "new two".to_string(),
            },
        ];
        let count = replace_questions(&store, &cache, &new).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(store.count_questions().await.unwrap(), 2);
        assert!(store.get_question(old_id).await.unwrap().is_none());
        assert!(cache.get("s", old_id).is_none());
    }
}
