//! Confidence scoring: how well a résumé matches an inferred role.

use crate::errors::AppError;
use crate::inference::prompts::CONFIDENCE_TEMPLATE;
use crate::llm_client::TextGenerator;

pub fn build_confidence_prompt(resume_content: &str, inferred_role: &str) -> String {
    CONFIDENCE_TEMPLATE
        .replace("{inferred_role}", inferred_role)
        .replace("{resume_content}", resume_content)
}

/// Parses the leading integer of `raw` the way a lenient number reader would:
/// surrounding whitespace and trailing junk ("85%", "85.7") are ignored.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Validates a raw model reply and normalizes it to a 0–1 fraction.
pub fn normalize_confidence(raw: &str) -> Result<f64, AppError> {
    match parse_leading_int(raw) {
        Some(value) if (0..=100).contains(&value) => Ok(value as f64 / 100.0),
        _ => Err(AppError::UnprocessableEntity {
            message: "Invalid confidence returned from Google AI".to_string(),
            raw: raw.to_string(),
        }),
    }
}

/// Asks the model for a 0–100 match score and returns it as a fraction.
pub async fn score_confidence(
    llm: &dyn TextGenerator,
    resume_content: &str,
    inferred_role: &str,
) -> Result<f64, AppError> {
    let raw = llm
        .generate(&build_confidence_prompt(resume_content, inferred_role))
        .await
        .map_err(|e| AppError::llm("Failed to get confidence", e))?;
    normalize_confidence(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;

    #[test]
    fn test_parse_leading_int_is_lenient() {
        assert_eq!(parse_leading_int("85"), Some(85));
        assert_eq!(parse_leading_int(" 85%\n"), Some(85));
        assert_eq!(parse_leading_int("85.7"), Some(85));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("about 80"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_normalize_confidence_bounds() {
        assert_eq!(normalize_confidence("0").unwrap(), 0.0);
        assert_eq!(normalize_confidence("100").unwrap(), 1.0);
        assert!((normalize_confidence("73").unwrap() - 0.73).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_values_are_unprocessable() {
        for raw in ["101", "-1", "1000", "high", "N/A"] {
            match normalize_confidence(raw) {
                Err(AppError::UnprocessableEntity { raw: surfaced, .. }) => {
                    assert_eq!(surfaced, raw)
                }
                other => panic!("expected 422 for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_normalized_value_always_in_unit_interval() {
        for n in 0..=100 {
            let value = normalize_confidence(&n.to_string()).unwrap();
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[tokio::test]
    async fn test_score_confidence_embeds_role_in_prompt() {
        let llm = ScriptedGenerator::new().reply("92");
        let confidence = score_confidence(&llm, "resume text", "Data Analyst")
            .await
            .unwrap();
        assert!((confidence - 0.92).abs() < f64::EPSILON);
        assert!(llm.prompts()[0].contains("\"Data Analyst\""));
    }
}
