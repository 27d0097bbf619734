//! Profile model - the structured resume document.
//!
//! The parsing service returns this as one nested JSON document; the client
//! edits it and appends a new row to the store on save. Every field carries a
//! serde default so a partially-filled or older document decodes as "absent",
//! never as an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user's structured resume, as extracted by the parsing service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Basic identity and experience
    #[serde(default)]
    pub user_profile: UserProfile,

    /// Education entries
    #[serde(default)]
    pub education: Vec<Education>,

    /// Domains the user has worked in
    #[serde(default)]
    pub experience_domains: Vec<String>,

    /// Skill categories
    #[serde(default)]
    pub skills: Skills,

    /// Projects and other work signals
    #[serde(default)]
    pub projects_or_work_signals: Vec<ProjectSignal>,

    /// Certifications and courses
    #[serde(default)]
    pub certifications_courses: Vec<String>,

    /// Achievement signals
    #[serde(default)]
    pub achievements_signals: Vec<String>,

    /// Spoken/written languages
    #[serde(default)]
    pub languages: Vec<String>,

    /// Learning-habit indicators
    #[serde(default)]
    pub learning_indicators: LearningIndicators,

    /// Fields inferred by the parsing service rather than stated in the resume
    #[serde(default)]
    pub ai_inferred: AiInferred,

    /// Stated career goal
    #[serde(default)]
    pub career_goal: CareerGoal,
}

/// Personal information block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Full name
    #[serde(default)]
    pub name: String,

    /// Current role or title
    #[serde(default)]
    pub current_role: String,

    /// Years of professional experience
    #[serde(default)]
    pub experience_years: u32,

    /// Career stage label
    #[serde(default = "default_career_stage")]
    pub career_stage: String,
}

fn default_career_stage() -> String {
    "student".to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            current_role: String::new(),
            experience_years: 0,
            career_stage: default_career_stage(),
        }
    }
}

/// One education entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    /// Degree name
    #[serde(default)]
    pub degree: String,

    /// Field of study
    #[serde(default)]
    pub field_of_study: String,

    /// Level (diploma, bachelors, masters, other)
    #[serde(default)]
    pub level: String,
}

/// Skills grouped by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skills {
    /// Technical skills
    #[serde(default)]
    pub technical: Vec<String>,

    /// Tools
    #[serde(default)]
    pub tools: Vec<String>,

    /// Domain skills
    #[serde(default)]
    pub domain: Vec<String>,

    /// Soft skills
    #[serde(default)]
    pub soft: Vec<String>,
}

/// A project or other signal of hands-on work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSignal {
    /// Project title
    #[serde(default)]
    pub title: String,

    /// Domain of the project
    #[serde(default)]
    pub domain: String,

    /// Skills the project demonstrates
    #[serde(default)]
    pub skills_demonstrated: Vec<String>,
}

/// Indicators of continuous learning extracted from the resume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearningIndicators {
    /// Whether any certifications were found
    #[serde(default)]
    pub has_certifications: bool,

    /// Whether quantified impact statements were found
    #[serde(default)]
    pub has_quantified_impact: bool,

    /// Heuristic learning score
    #[serde(default)]
    pub continuous_learning_score: u32,
}

/// Fields the parsing service infers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiInferred {
    /// Primary domain
    #[serde(default)]
    pub primary_domain: String,

    /// Secondary domains
    #[serde(default)]
    pub secondary_domains: Vec<String>,

    /// Estimated skill level
    #[serde(default)]
    pub skill_level_estimate: String,

    /// Areas of strength
    #[serde(default)]
    pub strength_areas: Vec<String>,

    /// Probable skill gaps
    #[serde(default)]
    pub probable_skill_gaps: Vec<String>,
}

/// Stated career goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerGoal {
    /// Target role
    #[serde(default)]
    pub target_role: String,

    /// Target domain
    #[serde(default)]
    pub target_domain: String,
}

impl Profile {
    /// Skills counted as "known" by the roadmap and analytics flows:
    /// technical skills plus tools, in document order.
    pub fn known_skills(&self) -> Vec<String> {
        self.skills
            .technical
            .iter()
            .chain(self.skills.tools.iter())
            .cloned()
            .collect()
    }

    /// Case-insensitive membership check against the known skills.
    pub fn knows(&self, skill: &str) -> bool {
        self.known_skills()
            .iter()
            .any(|s| s.eq_ignore_ascii_case(skill))
    }

    /// Decode a profile from its stored document form.
    ///
    /// Each top-level section decodes on its own: a malformed one falls back
    /// to its default without discarding the well-formed sections around it.
    /// A non-object root decodes as the empty profile. Never fatal.
    pub fn from_document(document: &Value) -> Self {
        let Some(map) = document.as_object() else {
            return Self::default();
        };
        Self {
            user_profile: section(map, "user_profile"),
            education: section(map, "education"),
            experience_domains: section(map, "experience_domains"),
            skills: section(map, "skills"),
            projects_or_work_signals: section(map, "projects_or_work_signals"),
            certifications_courses: section(map, "certifications_courses"),
            achievements_signals: section(map, "achievements_signals"),
            languages: section(map, "languages"),
            learning_indicators: section(map, "learning_indicators"),
            ai_inferred: section(map, "ai_inferred"),
            career_goal: section(map, "career_goal"),
        }
    }
}

/// Decode one top-level section, treating absent or malformed values as
/// the section default.
fn section<T: DeserializeOwned + Default>(map: &Map<String, Value>, key: &str) -> T {
    map.get(key)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_skills_are_technical_plus_tools() {
        let mut profile = Profile::default();
        profile.skills.technical = vec!["Python".into(), "React".into()];
        profile.skills.tools = vec!["Docker".into()];
        profile.skills.domain = vec!["Logistics".into()];
        profile.skills.soft = vec!["Communication".into()];

        assert_eq!(profile.known_skills(), vec!["Python", "React", "Docker"]);
        assert!(profile.knows("docker"));
        assert!(!profile.knows("Logistics"));
    }

    #[test]
    fn test_malformed_section_does_not_erase_the_others() {
        let document = json!({
            "user_profile": { "name": "Ada" },
            "skills": { "technical": ["Rust"] },
            "education": "not-a-list"
        });

        // The broken section falls back to its default; the sections around
        // it survive.
        let profile = Profile::from_document(&document);
        assert!(profile.education.is_empty());
        assert_eq!(profile.user_profile.name, "Ada");
        assert_eq!(profile.known_skills(), vec!["Rust"]);
    }

    #[test]
    fn test_non_object_document_is_the_empty_profile() {
        let profile = Profile::from_document(&json!("resume.pdf"));
        assert!(profile.known_skills().is_empty());
        assert_eq!(profile.user_profile.career_stage, "student");
    }

    #[test]
    fn test_partial_document_keeps_what_it_has() {
        let document = json!({
            "user_profile": { "name": "Ada", "experience_years": 3 },
            "skills": { "technical": ["Rust"] }
        });

        let profile = Profile::from_document(&document);
        assert_eq!(profile.user_profile.name, "Ada");
        assert_eq!(profile.user_profile.experience_years, 3);
        assert_eq!(profile.user_profile.career_stage, "student");
        assert_eq!(profile.known_skills(), vec!["Rust"]);
        assert!(profile.languages.is_empty());
    }
}
