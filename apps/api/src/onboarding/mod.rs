//! Résumé onboarding pipeline.
//!
//! Step order: infer role, score confidence, persist the profile, generate
//! questions, replace the global set, mark onboarding complete. Upstream
//! failures downgrade the outcome instead of failing the request; store
//! failures propagate. Nothing already written is rolled back.

pub mod handlers;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::inference::confidence::score_confidence;
use crate::inference::questions::generate_questions;
use crate::inference::role::{infer_role, InferredRole};
use crate::llm_client::TextGenerator;
use crate::practice::SuggestionCache;
use crate::profile::{self, INFERRED_ROLE, RESUME_CONTENT, RESUME_FILENAME};
use crate::questions::replace_questions;
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub content: String,
    pub filename: String,
}

/// How far the pipeline got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OnboardingStatus {
    /// Role inference failed; only the résumé was stored.
    ResumeOnly,
    /// Profile stored, but question generation failed.
    RoleInferred,
    Complete,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingOutcome {
    pub status: OnboardingStatus,
    pub inferred_role: Option<InferredRole>,
    /// Informational only; `None` when scoring failed.
    pub confidence: Option<f64>,
    pub questions_inserted: usize,
}

pub async fn run_onboarding<S: Store + ?Sized>(
    store: &S,
    llm: &dyn TextGenerator,
    suggestions: &SuggestionCache,
    upload: &ResumeUpload,
) -> Result<OnboardingOutcome, AppError> {
    if upload.content.trim().is_empty() {
        return Err(AppError::Validation("Résumé content is empty".to_string()));
    }

    let role = match infer_role(llm, &upload.content).await {
        Ok(role) => role,
        Err(e) => {
            warn!("Role inference failed, storing résumé only: {e}");
            store_resume(store, upload).await?;
            return Ok(OnboardingOutcome {
                status: OnboardingStatus::ResumeOnly,
                inferred_role: None,
                confidence: None,
                questions_inserted: 0,
            });
        }
    };
    if !role.is_recognized() {
        warn!("Model returned an unlisted role: {role}");
    }

    let confidence = match score_confidence(llm, &upload.content, role.label()).await {
        Ok(confidence) => Some(confidence),
        Err(e) => {
            warn!("Confidence scoring failed: {e}");
            None
        }
    };

    store_resume(store, upload).await?;
    store.set_value(INFERRED_ROLE, role.label()).await?;
    info!("Stored résumé '{}' with role {role}", upload.filename);

    let questions = match generate_questions(llm, role.label()).await {
        Ok(questions) => questions,
        Err(e) => {
            warn!("Question generation failed for {role}: {e}");
            return Ok(OnboardingOutcome {
                status: OnboardingStatus::RoleInferred,
                inferred_role: Some(role),
                confidence,
                questions_inserted: 0,
            });
        }
    };

    let questions_inserted = if questions.is_empty() {
        warn!("Generation returned no usable questions; keeping the current set");
        0
    } else {
        replace_questions(store, suggestions, &questions).await?
    };

    profile::complete_onboarding(store).await?;
    info!("Onboarding complete ({questions_inserted} questions)");

    Ok(OnboardingOutcome {
        status: OnboardingStatus::Complete,
        inferred_role: Some(role),
        confidence,
        questions_inserted,
    })
}

/// Blanks the stored résumé, its filename and the inferred role.
pub async fn remove_resume<S: Store + ?Sized>(store: &S) -> Result<(), AppError> {
    for key in [RESUME_CONTENT, RESUME_FILENAME, INFERRED_ROLE] {
        store.set_value(key, "").await?;
    }
    info!("Removed stored résumé");
    Ok(())
}

async fn store_resume<S: Store + ?Sized>(store: &S, upload: &ResumeUpload) -> Result<(), AppError> {
    store.set_value(RESUME_CONTENT, &upload.content).await?;
    store.set_value(RESUME_FILENAME, &upload.filename).await
}
