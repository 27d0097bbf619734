//! Calendar event types.
//!
//! Roadmap days and projects are projected onto calendar dates so a month
//! view can show what is scheduled and what is done. The projection itself
//! lives in the tracker crate; only the event shape is defined here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::RoadmapId;

/// Kind of calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A daily-plan task
    Task,
    /// A project starting on this date
    Project,
}

/// One dated entry in the learning calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Record the event belongs to
    pub roadmap_id: RoadmapId,

    /// Technology being learned
    pub tech_stack: String,

    /// Day of month (1-31)
    pub day: u32,

    /// Roadmap day number, for task events
    #[serde(default)]
    pub roadmap_day: Option<u32>,

    /// Calendar date
    pub date: NaiveDate,

    /// Event title
    #[serde(default)]
    pub title: String,

    /// Task or project
    #[serde(rename = "type")]
    pub kind: EventKind,

    /// Completion flag, for task events
    #[serde(default)]
    pub completed: bool,

    /// Estimated effort in hours
    #[serde(default)]
    pub estimated_hours: f32,

    /// Original day-range string, for project events
    #[serde(default)]
    pub day_range: Option<String>,
}
