//! Month-view projection of a roadmap record.
//!
//! Day 1 of every roadmap in a record maps to the record's start date and
//! successive days to successive calendar dates. Projects are pinned to the
//! date of the first day named in their `day_range` string.

use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use skillpath_core::{CalendarEvent, EventKind, RoadmapRecord};

/// Project a record's tasks and projects onto one calendar month.
///
/// Returns an empty list when the record carries no usable start date.
/// Events are sorted by date, then technology, then kind.
pub fn month_events(record: &RoadmapRecord, month: u32, year: i32) -> Vec<CalendarEvent> {
    let Some(start) = record.effective_start_date() else {
        return Vec::new();
    };

    let mut events = Vec::new();
    for roadmap in &record.roadmaps {
        for plan in &roadmap.daily_plan {
            let Some(date) = date_for_day(start, plan.day) else {
                continue;
            };
            if date.month() != month || date.year() != year {
                continue;
            }
            events.push(CalendarEvent {
                roadmap_id: record.id.clone(),
                tech_stack: roadmap.tech_stack.clone(),
                day: date.day(),
                roadmap_day: Some(plan.day),
                date,
                title: plan.title.clone(),
                kind: EventKind::Task,
                completed: record.progress.is_done(&roadmap.tech_stack, plan.day),
                estimated_hours: plan.estimated_hours,
                day_range: None,
            });
        }

        for project in &roadmap.projects {
            // Projects with a day range we cannot read are skipped, not errors.
            let Some(first_day) = first_number(&project.day_range) else {
                continue;
            };
            let Some(date) = date_for_day(start, first_day) else {
                continue;
            };
            if date.month() != month || date.year() != year {
                continue;
            }
            events.push(CalendarEvent {
                roadmap_id: record.id.clone(),
                tech_stack: roadmap.tech_stack.clone(),
                day: date.day(),
                roadmap_day: None,
                date,
                title: project.title.clone(),
                kind: EventKind::Project,
                completed: false,
                estimated_hours: project.estimated_hours,
                day_range: Some(project.day_range.clone()),
            });
        }
    }

    events.sort_by(|a, b| {
        (a.date, &a.tech_stack, a.kind == EventKind::Project).cmp(&(
            b.date,
            &b.tech_stack,
            b.kind == EventKind::Project,
        ))
    });
    events
}

/// Calendar date of a 1-based roadmap day.
fn date_for_day(start: NaiveDate, day: u32) -> Option<NaiveDate> {
    if day == 0 {
        return None;
    }
    start.checked_add_days(Days::new(u64::from(day - 1)))
}

/// First run of digits in a day-range string, e.g. 3 for "Days 3-5".
fn first_number(day_range: &str) -> Option<u32> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("literal pattern compiles"));
    re.find(day_range)?.as_str().parse().ok()
}
