//! Roadmap progress tracking, calendar projection, and skill analytics.

#![warn(missing_docs)]

mod analytics;
mod calendar;
mod tracker;

pub use analytics::{analyze, is_known_skill, RiskBreakdown, SkillAssessment, SkillHealth, SkillsReport};
pub use calendar::month_events;
pub use tracker::{ProgressSink, RoadmapTracker, ToggleError, ToggleReceipt};
