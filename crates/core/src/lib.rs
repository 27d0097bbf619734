//! skillpath core data models.
//!
//! This crate defines the data structures and pure domain logic shared by
//! the career-roadmap client: the structured resume profile, generated
//! roadmaps, the completion index with its aggregation rules, the skill
//! risk heuristic, and path-addressed document updates.

#![warn(missing_docs)]

// Identities
mod id;

// Resume and profile
mod document;
mod profile;

// Roadmaps and progress
mod calendar;
mod progress;
mod roadmap;
mod suggestion;

// Skill market heuristic
mod risk;

// Re-exports
pub use id::{ResumeId, RevisionId, RoadmapId, SessionId, UserId};

pub use profile::{
    AiInferred, CareerGoal, Education, LearningIndicators, Profile, ProjectSignal, Skills,
    UserProfile,
};

pub use roadmap::{
    CapstoneProject, DayPlan, ProjectPlan, Roadmap, RoadmapRecord, SkillLevel,
};

pub use progress::{overall_percent, percent_complete, ProgressIndex, ToggleOutcome};

pub use suggestion::{TechStackSelection, TechStackSuggestion};

pub use calendar::{CalendarEvent, EventKind};

pub use risk::{classify, Demand, RiskTier, SkillSignal, Trend};

pub use document::{push_path, remove_at, set_path, FieldPath, PathError};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
