//! Role inference: maps résumé text to one professional role label.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::inference::prompts::ROLE_INFERENCE_TEMPLATE;
use crate::llm_client::TextGenerator;

/// Role label produced by inference.
///
/// The model is asked to pick from the known labels but nothing forces it to;
/// anything else is kept verbatim in `Unrecognized` and still stored and shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferredRole {
    FrontendDeveloper,
    BackendDeveloper,
    FullStackDeveloper,
    DataScientist,
    DataAnalyst,
    DevOpsEngineer,
    MobileDeveloper,
    QaEngineer,
    ProductManager,
    UiUxDesigner,
    SoftwareEngineer,
    General,
    Unrecognized(String),
}

impl InferredRole {
    pub const KNOWN: [InferredRole; 12] = [
        InferredRole::FrontendDeveloper,
        InferredRole::BackendDeveloper,
        InferredRole::FullStackDeveloper,
        InferredRole::DataScientist,
        InferredRole::DataAnalyst,
        InferredRole::DevOpsEngineer,
        InferredRole::MobileDeveloper,
        InferredRole::QaEngineer,
        InferredRole::ProductManager,
        InferredRole::UiUxDesigner,
        InferredRole::SoftwareEngineer,
        InferredRole::General,
    ];

    pub fn label(&self) -> &str {
        match self {
            InferredRole::FrontendDeveloper => "Frontend Developer",
            InferredRole::BackendDeveloper => "Backend Developer",
            InferredRole::FullStackDeveloper => "Full Stack Developer",
            InferredRole::DataScientist => "Data Scientist",
            InferredRole::DataAnalyst => "Data Analyst",
            InferredRole::DevOpsEngineer => "DevOps Engineer",
            InferredRole::MobileDeveloper => "Mobile Developer",
            InferredRole::QaEngineer => "QA Engineer",
            InferredRole::ProductManager => "Product Manager",
            InferredRole::UiUxDesigner => "UI/UX Designer",
            InferredRole::SoftwareEngineer => "Software Engineer",
            InferredRole::General => "General",
            InferredRole::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, InferredRole::Unrecognized(_))
    }

    /// Case-insensitive match on the known labels, canonicalized to their
    /// `label()`. Anything else is kept trimmed but otherwise verbatim.
    pub fn parse(raw: &str) -> InferredRole {
        let trimmed = raw.trim();
        InferredRole::KNOWN
            .iter()
            .find(|role| role.label().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| InferredRole::Unrecognized(trimmed.to_string()))
    }
}

impl fmt::Display for InferredRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for InferredRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for InferredRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(InferredRole::parse(&raw))
    }
}

pub fn build_role_prompt(resume_content: &str) -> String {
    let role_list = InferredRole::KNOWN
        .iter()
        .map(|r| format!("- {}", r.label()))
        .collect::<Vec<_>>()
        .join("\n");
    ROLE_INFERENCE_TEMPLATE
        .replace("{role_list}", &role_list)
        .replace("{resume_content}", resume_content)
}

/// Asks the model for the best-fitting role.
pub async fn infer_role(
    llm: &dyn TextGenerator,
    resume_content: &str,
) -> Result<InferredRole, AppError> {
    let raw = llm
        .generate(&build_role_prompt(resume_content))
        .await
        .map_err(|e| AppError::llm("Failed to infer role", e))?;

    let role = InferredRole::parse(&raw);
    if role.is_recognized() {
        info!("Inferred role: {role}");
    } else {
        warn!("Model returned a role outside the known labels: {raw:?}");
    }
    Ok(role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::LlmError;

    #[test]
    fn test_parse_known_labels_case_insensitively() {
        assert_eq!(
            InferredRole::parse("backend developer"),
            InferredRole::BackendDeveloper
        );
        assert_eq!(
            InferredRole::parse("  UI/UX Designer\n"),
            InferredRole::UiUxDesigner
        );
        assert_eq!(InferredRole::parse("qa engineer"), InferredRole::QaEngineer);
    }

    #[test]
    fn test_unknown_label_passes_through_verbatim() {
        let role = InferredRole::parse("Site Reliability Engineer");
        assert_eq!(
            role,
            InferredRole::Unrecognized("Site Reliability Engineer".to_string())
        );
        assert!(!role.is_recognized());
        assert_eq!(role.label(), "Site Reliability Engineer");
    }

    #[test]
    fn test_every_known_label_round_trips() {
        for role in InferredRole::KNOWN {
            assert_eq!(InferredRole::parse(role.label()), role);
        }
    }

    #[test]
    fn test_serializes_as_plain_label() {
        let json = serde_json::to_string(&InferredRole::DevOpsEngineer).unwrap();
        assert_eq!(json, "\"DevOps Engineer\"");
        let other: InferredRole = serde_json::from_str("\"Astronaut\"").unwrap();
        assert_eq!(other.label(), "Astronaut");
    }

    #[test]
    fn test_prompt_lists_all_labels_and_resume() {
        let prompt = build_role_prompt("Senior Java backend engineer");
        for role in InferredRole::KNOWN {
            assert!(prompt.contains(&format!("- {}", role.label())));
        }
        assert!(prompt.contains("Senior Java backend engineer"));
    }

    #[tokio::test]
    async fn test_infer_role_uses_model_reply() {
        let llm = ScriptedGenerator::new().reply("Backend Developer");
        let role = infer_role(&llm, "Senior Java backend engineer, 5 years microservices")
            .await
            .unwrap();
        assert_eq!(role, InferredRole::BackendDeveloper);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_infer_role_reports_unconfigured_key() {
        let llm = ScriptedGenerator::new().fail(LlmError::NotConfigured);
        let err = infer_role(&llm, "resume").await.unwrap_err();
        assert!(matches!(err, AppError::LlmNotConfigured));
    }
}
