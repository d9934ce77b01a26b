//! User profile kept as key/value rows: résumé text, inferred role, onboarding
//! flag and free-form extra experiences.

pub mod handlers;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::store::ProfileStore;

pub const RESUME_CONTENT: &str = "resume_content";
pub const RESUME_FILENAME: &str = "resume_filename";
pub const INFERRED_ROLE: &str = "inferred_role";
pub const ONBOARDING_COMPLETED: &str = "onboarding_completed";
pub const EXPERIENCE_PREFIX: &str = "experience_";

/// Exactly the rows present after `clear_all`.
pub const DEFAULT_ENTRIES: [(&str, &str); 3] = [
    (ONBOARDING_COMPLETED, "false"),
    (RESUME_CONTENT, ""),
    (RESUME_FILENAME, ""),
];

/// Reads a key, treating an empty stored string as absent.
pub async fn get_value<S: ProfileStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Option<String>, AppError> {
    Ok(store.get_value(key).await?.filter(|v| !v.is_empty()))
}

/// Experiences in the order they were written, as `(key, content)`.
pub async fn list_experiences<S: ProfileStore + ?Sized>(
    store: &S,
) -> Result<Vec<(String, String)>, AppError> {
    Ok(store
        .list_by_prefix(EXPERIENCE_PREFIX)
        .await?
        .into_iter()
        .filter(|row| !row.value.is_empty())
        .map(|row| (row.key, row.value))
        .collect())
}

/// Stores a new experience under a freshly generated key and returns that key.
/// Keys never encode position, so removals cannot make later additions collide.
pub async fn add_experience<S: ProfileStore + ?Sized>(
    store: &S,
    content: &str,
) -> Result<String, AppError> {
    let key = format!("{EXPERIENCE_PREFIX}{}", Uuid::new_v4().simple());
    store.set_value(&key, content).await?;
    info!("Added experience {key}");
    Ok(key)
}

/// Removes one experience. Only `experience_*` keys are accepted.
pub async fn remove_experience<S: ProfileStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<bool, AppError> {
    if !key.starts_with(EXPERIENCE_PREFIX) {
        return Err(AppError::Validation(format!(
            "'{key}' is not an experience key"
        )));
    }
    store.delete_key(key).await
}

/// Résumé plus every extra experience, formatted as LLM context.
pub async fn combined_context<S: ProfileStore + ?Sized>(store: &S) -> Result<String, AppError> {
    let resume = get_value(store, RESUME_CONTENT).await?;
    let experiences = list_experiences(store).await?;
    Ok(format_combined_context(resume.as_deref(), &experiences))
}

pub fn format_combined_context(resume: Option<&str>, experiences: &[(String, String)]) -> String {
    let mut combined = String::new();
    if let Some(resume) = resume.filter(|r| !r.is_empty()) {
        combined.push_str(&format!("RESUME CONTENT:\n{resume}\n\n"));
    }
    if !experiences.is_empty() {
        combined.push_str("ADDITIONAL EXPERIENCES:\n\n");
        for (idx, (_, content)) in experiences.iter().enumerate() {
            combined.push_str(&format!("{}. {content}\n\n", idx + 1));
        }
    }
    combined
}

pub async fn onboarding_completed<S: ProfileStore + ?Sized>(store: &S) -> Result<bool, AppError> {
    Ok(store.get_value(ONBOARDING_COMPLETED).await?.as_deref() == Some("true"))
}

pub async fn complete_onboarding<S: ProfileStore + ?Sized>(store: &S) -> Result<(), AppError> {
    store.set_value(ONBOARDING_COMPLETED, "true").await
}
