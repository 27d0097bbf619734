//! Roadmap model - a per-technology, multi-day learning plan.
//!
//! Roadmaps are produced by the generation service and are immutable on the
//! client except for their progress record. Field names follow the backend
//! wire contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::RoadmapId;
use crate::progress::ProgressIndex;

/// Self-reported skill level used to calibrate a generated plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    /// Starting from scratch
    Beginner,
    /// Some experience
    Intermediate,
    /// Wants to master the topic
    Advanced,
}

impl SkillLevel {
    /// Parse from the lowercase wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Lowercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A learning plan for one technology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    /// Technology this plan teaches
    pub tech_stack: String,

    /// One-paragraph overview
    #[serde(default)]
    pub overview: String,

    /// Requested duration in days
    #[serde(default)]
    pub duration_days: u32,

    /// Skill level the plan was generated for
    #[serde(default = "default_skill_level")]
    pub skill_level: SkillLevel,

    /// Day-by-day plan, ordered by day number
    #[serde(default)]
    pub daily_plan: Vec<DayPlan>,

    /// Intermediate projects
    #[serde(default)]
    pub projects: Vec<ProjectPlan>,

    /// Final capstone project
    #[serde(default)]
    pub capstone_project: Option<CapstoneProject>,
}

fn default_skill_level() -> SkillLevel {
    SkillLevel::Beginner
}

impl Roadmap {
    /// Number of days in the daily plan.
    pub fn total_days(&self) -> usize {
        self.daily_plan.len()
    }
}

/// One day of a roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number, unique within a roadmap
    pub day: u32,

    /// Day title
    #[serde(default)]
    pub title: String,

    /// Focus of the day
    #[serde(default)]
    pub focus: String,

    /// Estimated effort in hours
    #[serde(default)]
    pub estimated_hours: f32,

    /// Topics to cover
    #[serde(default)]
    pub topics: Vec<String>,

    /// Hands-on tasks
    #[serde(default)]
    pub hands_on_tasks: Vec<String>,

    /// Optional checkpoint to verify before moving on
    #[serde(default)]
    pub checkpoint: Option<String>,
}

/// An intermediate project spanning a range of days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPlan {
    /// Project title
    pub title: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Human-readable day range, e.g. "Days 3-5"
    #[serde(default)]
    pub day_range: String,

    /// Estimated effort in hours
    #[serde(default)]
    pub estimated_hours: f32,

    /// Learning objectives
    #[serde(default)]
    pub objectives: Vec<String>,
}

/// The final capstone project of a roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapstoneProject {
    /// Project title
    pub title: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Features to implement
    #[serde(default)]
    pub features: Vec<String>,
}

/// A stored roadmap row: one or more roadmaps generated together, plus the
/// progress recorded against them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapRecord {
    /// Backend-assigned row id
    pub id: RoadmapId,

    /// Roadmaps in this record, one per selected technology
    #[serde(default)]
    pub roadmaps: Vec<Roadmap>,

    /// Completion record
    #[serde(default)]
    pub progress: ProgressIndex,

    /// Calendar date day 1 maps to
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Row creation time
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl RoadmapRecord {
    /// Find a roadmap by technology name.
    pub fn roadmap(&self, tech_stack: &str) -> Option<&Roadmap> {
        self.roadmaps.iter().find(|r| r.tech_stack == tech_stack)
    }

    /// The date day 1 of every roadmap in this record maps to. Falls back to
    /// the row creation date when no explicit start date was stored.
    pub fn effective_start_date(&self) -> Option<NaiveDate> {
        self.start_date
            .or_else(|| self.created_at.map(|t| t.date_naive()))
    }
}
