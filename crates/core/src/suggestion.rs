//! Tech-stack suggestion DTOs.

use serde::{Deserialize, Serialize};

use crate::roadmap::SkillLevel;

/// One technology suggested by the recommendation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechStackSuggestion {
    /// Technology name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Category, e.g. "frontend"
    #[serde(default)]
    pub category: String,

    /// Difficulty label
    #[serde(default)]
    pub difficulty: String,

    /// Relevance to the stated interests, 1-10
    #[serde(default)]
    pub relevance_score: i32,

    /// Whether the skill is already in the user's profile
    #[serde(default)]
    pub already_known: bool,

    /// Prerequisite technologies
    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Example use cases
    #[serde(default)]
    pub use_cases: Vec<String>,
}

/// A user's choice of technology, duration and level for generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechStackSelection {
    /// Technology to learn
    pub tech_stack: String,

    /// Requested plan length in days
    pub duration_days: u32,

    /// Current skill level
    pub skill_level: SkillLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wire_names() {
        let selection = TechStackSelection {
            tech_stack: "Rust".into(),
            duration_days: 30,
            skill_level: SkillLevel::Intermediate,
        };
        let wire = serde_json::to_value(&selection).unwrap();
        assert_eq!(
            wire,
            serde_json::json!({
                "tech_stack": "Rust",
                "duration_days": 30,
                "skill_level": "intermediate"
            })
        );
    }

    #[test]
    fn test_suggestion_decodes_with_minimal_fields() {
        let suggestion: TechStackSuggestion =
            serde_json::from_value(serde_json::json!({ "name": "FastAPI" })).unwrap();
        assert_eq!(suggestion.name, "FastAPI");
        assert!(!suggestion.already_known);
        assert!(suggestion.prerequisites.is_empty());
    }
}
