//! Question generation: role-specific behavioral questions from the model.

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::inference::prompts::QUESTION_GENERATION_TEMPLATE;
use crate::llm_client::{strip_json_fences, TextGenerator};
use crate::models::question::{Category, NewQuestion};

pub fn build_question_prompt(role: &str) -> String {
    let category_list = Category::ALL
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    QUESTION_GENERATION_TEMPLATE
        .replace("{category_list}", &category_list)
        .replace("{role}", role)
}

/// Parses the model's reply into questions.
///
/// The reply must be a JSON array (fences allowed); anything else fails the
/// whole call. Individual entries without a non-empty string `text` and
/// `category` are dropped. Categories are normalized, never rejected.
pub fn parse_generated_questions(raw: &str) -> Result<Vec<NewQuestion>, AppError> {
    let parsed: Value = serde_json::from_str(strip_json_fences(raw)).map_err(|e| {
        AppError::Llm(format!("Failed to parse questions from AI response: {e}"))
    })?;

    let items = parsed.as_array().ok_or_else(|| {
        AppError::Llm("Failed to parse questions from AI response: expected a JSON array".to_string())
    })?;

    let questions: Vec<NewQuestion> = items
        .iter()
        .filter_map(|item| {
            let category = non_empty_str(item.get("category"))?;
            let text = non_empty_str(item.get("text"))?;
            Some(NewQuestion {
                category: Category::normalize(category),
                text: text.to_string(),
            })
        })
        .collect();

    let dropped = items.len() - questions.len();
    if dropped > 0 {
        warn!("Dropped {dropped} generated entries missing text or category");
    }
    Ok(questions)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Generates behavioral questions for `role`.
pub async fn generate_questions(
    llm: &dyn TextGenerator,
    role: &str,
) -> Result<Vec<NewQuestion>, AppError> {
    let raw = llm
        .generate(&build_question_prompt(role))
        .await
        .map_err(|e| AppError::llm("Failed to generate questions", e))?;

    let questions = parse_generated_questions(&raw)?;
    info!("Generated {} questions for role {role}", questions.len());
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;

    #[test]
    fn test_parses_fenced_array_and_normalizes_categories() {
        let raw = r#"```json
[
  {"category": "Leadership", "text": "Tell me about a time you led a team."},
  {"category": "technical", "text": "Tell me about a time you debugged production."},
  {"category": "Creativity", "text": "Tell me about a time you proposed a new idea."},
  {"category": "Bravery", "text": "Tell me about a time you took a risk."}
]
```"#;
        let questions = parse_generated_questions(raw).unwrap();
        let categories: Vec<Category> = questions.iter().map(|q| q.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Leadership,
                Category::ProblemSolving,
                Category::CreativityAndInnovation,
                Category::ProblemSolving,
            ]
        );
    }

    #[test]
    fn test_entries_missing_text_or_category_are_dropped() {
        let raw = r#"[
            {"category": "Teamwork", "text": "Tell me about a time you helped a teammate."},
            {"category": "Teamwork", "text": ""},
            {"category": "Teamwork"},
            {"text": "No category here"},
            {"category": "Teamwork", "text": 42},
            "just a string"
        ]"#;
        let questions = parse_generated_questions(raw).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].category, Category::Teamwork);
    }

    #[test]
    fn test_non_json_reply_fails_whole_call() {
        assert!(matches!(
            parse_generated_questions("Here are some questions: 1. ..."),
            Err(AppError::Llm(_))
        ));
    }

    #[test]
    fn test_json_object_instead_of_array_fails() {
        assert!(matches!(
            parse_generated_questions(r#"{"questions": []}"#),
            Err(AppError::Llm(_))
        ));
    }

    #[test]
    fn test_prompt_names_role_and_categories() {
        let prompt = build_question_prompt("Data Scientist");
        assert!(prompt.contains("for a Data Scientist position"));
        assert!(prompt.contains("Conflict Resolution"));
        assert!(prompt.contains("Creativity and Innovation"));
    }

    #[tokio::test]
    async fn test_generate_questions_end_to_end() {
        let llm = ScriptedGenerator::new()
            .reply(r#"[{"category": "Decision Making", "text": "Tell me about a hard call."}]"#);
        let questions = generate_questions(&llm, "Product Manager").await.unwrap();
        assert_eq!(
            questions,
            vec![NewQuestion {
                category: Category::DecisionMaking,
                text: "Tell me about a hard call.".to_string(),
            }]
        );
    }
}
