use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Sentinel accepted wherever a category filter is: means "no filter".
pub const ALL_CATEGORIES: &str = "All Categories";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub category: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A question as produced by generation and accepted by bulk insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub category: Category,
    pub text: String,
}

/// Canonical behavioral-question categories. Every stored question carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Leadership,
    #[serde(rename = "Problem Solving")]
    ProblemSolving,
    Communication,
    Teamwork,
    Adaptability,
    #[serde(rename = "Conflict Resolution")]
    ConflictResolution,
    #[serde(rename = "Time Management")]
    TimeManagement,
    #[serde(rename = "Decision Making")]
    DecisionMaking,
    #[serde(rename = "Stress Management")]
    StressManagement,
    #[serde(rename = "Creativity and Innovation")]
    CreativityAndInnovation,
}

/// Lowercased free-text labels the model tends to emit, mapped to a canonical category.
const CATEGORY_SYNONYMS: &[(&str, Category)] = &[
    ("leadership", Category::Leadership),
    ("problem solving", Category::ProblemSolving),
    ("communication", Category::Communication),
    ("teamwork", Category::Teamwork),
    ("adaptability", Category::Adaptability),
    ("technical", Category::ProblemSolving),
    ("technical skills", Category::ProblemSolving),
    ("conflict resolution", Category::ConflictResolution),
    ("time management", Category::TimeManagement),
    ("decision making", Category::DecisionMaking),
    ("stress management", Category::StressManagement),
    ("creativity and innovation", Category::CreativityAndInnovation),
    ("creativity", Category::CreativityAndInnovation),
    ("innovation", Category::CreativityAndInnovation),
];

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Leadership,
        Category::ProblemSolving,
        Category::Communication,
        Category::Teamwork,
        Category::Adaptability,
        Category::ConflictResolution,
        Category::TimeManagement,
        Category::DecisionMaking,
        Category::StressManagement,
        Category::CreativityAndInnovation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Leadership => "Leadership",
            Category::ProblemSolving => "Problem Solving",
            Category::Communication => "Communication",
            Category::Teamwork => "Teamwork",
            Category::Adaptability => "Adaptability",
            Category::ConflictResolution => "Conflict Resolution",
            Category::TimeManagement => "Time Management",
            Category::DecisionMaking => "Decision Making",
            Category::StressManagement => "Stress Management",
            Category::CreativityAndInnovation => "Creativity and Innovation",
        }
    }

    /// Maps any free-text label onto a canonical category.
    /// Total: unknown labels fall back to Problem Solving.
    pub fn normalize(label: &str) -> Category {
        let needle = label.trim().to_lowercase();
        CATEGORY_SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == needle)
            .map(|(_, category)| *category)
            .unwrap_or(Category::ProblemSolving)
    }

    /// Parses a category filter. `None` for absence or the "All Categories" sentinel.
    pub fn parse_filter(raw: Option<&str>) -> Result<Option<Category>, UnknownCategory> {
        match raw.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

/// Exact match on the canonical spelling.
impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
