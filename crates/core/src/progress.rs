//! Completion tracking for roadmaps.
//!
//! A [`ProgressIndex`] records which days of which roadmap have been marked
//! done. Aggregation into percentages and the one-shot completion signal both
//! live here as pure functions; the optimistic update flow around them is in
//! the tracker crate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::roadmap::Roadmap;

/// Completion record keyed by technology and day number.
///
/// Absent entries mean "not completed". Day keys cross the wire as JSON
/// object keys, i.e. strings; serde_json maps them to `u32` transparently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressIndex(HashMap<String, HashMap<u32, bool>>);

/// Result of applying one day toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Value the day held before the toggle (absent counts as false)
    pub previous: bool,

    /// True iff this toggle brought the roadmap to exactly 100%
    pub just_completed: bool,
}

impl ProgressIndex {
    /// Empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a day is marked completed.
    pub fn is_done(&self, tech_stack: &str, day: u32) -> bool {
        self.0
            .get(tech_stack)
            .and_then(|days| days.get(&day))
            .copied()
            .unwrap_or(false)
    }

    /// Number of plan days marked completed for a roadmap.
    ///
    /// Only days present in the daily plan are counted; stray entries under
    /// unknown day numbers never inflate the count.
    pub fn completed_days(&self, roadmap: &Roadmap) -> usize {
        roadmap
            .daily_plan
            .iter()
            .filter(|d| self.is_done(&roadmap.tech_stack, d.day))
            .count()
    }

    /// Set one day's completion value, returning the previous value.
    pub fn set(&mut self, tech_stack: &str, day: u32, completed: bool) -> bool {
        self.0
            .entry(tech_stack.to_string())
            .or_default()
            .insert(day, completed)
            .unwrap_or(false)
    }

    /// Apply a day toggle and report whether it completed the roadmap.
    ///
    /// `just_completed` fires only on a rising edge: the toggled day must be
    /// part of the daily plan, the new value must be true and, after applying
    /// it, every day of the plan must be done. Toggling a day off never fires
    /// the signal, and a later re-toggle of the same final day fires it
    /// again - the signal is a pure function of the freshly updated state,
    /// with no latch.
    pub fn apply_toggle(&mut self, roadmap: &Roadmap, day: u32, completed: bool) -> ToggleOutcome {
        let previous = self.set(&roadmap.tech_stack, day, completed);
        let in_plan = roadmap.daily_plan.iter().any(|d| d.day == day);
        let total = roadmap.total_days();
        let just_completed =
            completed && in_plan && total > 0 && self.completed_days(roadmap) == total;
        ToggleOutcome {
            previous,
            just_completed,
        }
    }

    /// Whether every day of the roadmap is done.
    pub fn is_complete(&self, roadmap: &Roadmap) -> bool {
        let total = roadmap.total_days();
        total > 0
            && roadmap
                .daily_plan
                .iter()
                .all(|d| self.is_done(&roadmap.tech_stack, d.day))
    }
}

/// Completion percentage for one roadmap, in [0, 100].
///
/// An empty daily plan is 0%, not a division error. Rounding is half-up.
pub fn percent_complete(roadmap: &Roadmap, progress: &ProgressIndex) -> u8 {
    let total = roadmap.total_days();
    if total == 0 {
        return 0;
    }
    let completed = progress.completed_days(roadmap);
    percent(completed, total)
}

/// Overall completion percentage across several roadmaps.
///
/// Totals and completed counts are summed before dividing. Averaging the
/// per-roadmap percentages would overweight short roadmaps.
pub fn overall_percent(roadmaps: &[Roadmap], progress: &ProgressIndex) -> u8 {
    let mut total = 0usize;
    let mut completed = 0usize;
    for roadmap in roadmaps {
        total += roadmap.total_days();
        completed += progress.completed_days(roadmap);
    }
    if total == 0 {
        return 0;
    }
    percent(completed, total)
}

fn percent(completed: usize, total: usize) -> u8 {
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::DayPlan;

    fn roadmap(tech_stack: &str, days: u32) -> Roadmap {
        Roadmap {
            tech_stack: tech_stack.to_string(),
            overview: String::new(),
            duration_days: days,
            skill_level: crate::roadmap::SkillLevel::Beginner,
            daily_plan: (1..=days)
                .map(|day| DayPlan {
                    day,
                    title: format!("Day {day}"),
                    focus: String::new(),
                    estimated_hours: 2.0,
                    topics: Vec::new(),
                    hands_on_tasks: Vec::new(),
                    checkpoint: None,
                })
                .collect(),
            projects: Vec::new(),
            capstone_project: None,
        }
    }

    #[test]
    fn test_percent_of_empty_plan_is_zero() {
        let progress = ProgressIndex::new();
        assert_eq!(percent_complete(&roadmap("Rust", 0), &progress), 0);
    }

    #[test]
    fn test_percent_bounds_and_full_completion() {
        let plan = roadmap("Rust", 3);
        let mut progress = ProgressIndex::new();
        assert_eq!(percent_complete(&plan, &progress), 0);

        progress.set("Rust", 1, true);
        assert_eq!(percent_complete(&plan, &progress), 33);
        assert!(!progress.is_complete(&plan));

        progress.set("Rust", 2, true);
        assert_eq!(percent_complete(&plan, &progress), 67); // half-up

        progress.set("Rust", 3, true);
        assert_eq!(percent_complete(&plan, &progress), 100);
        assert!(progress.is_complete(&plan));
    }

    #[test]
    fn test_overall_percent_is_not_an_average() {
        let short = roadmap("Go", 10);
        let long = roadmap("Kubernetes", 30);
        let mut progress = ProgressIndex::new();
        for day in 1..=10 {
            progress.set("Go", day, true);
        }

        // 10 of 40 days done: 25%, not the 50% that averaging the
        // per-roadmap percentages (100% and 0%) would give.
        assert_eq!(overall_percent(&[short, long], &progress), 25);
    }

    #[test]
    fn test_toggle_fires_only_on_completing_rising_edge() {
        let plan = roadmap("Rust", 5);
        let mut progress = ProgressIndex::new();
        for day in 1..=4 {
            progress.set("Rust", day, true);
        }

        let outcome = progress.apply_toggle(&plan, 5, true);
        assert!(!outcome.previous);
        assert!(outcome.just_completed);

        // Falling edge never fires, even though it was the last missing day.
        let outcome = progress.apply_toggle(&plan, 5, false);
        assert!(outcome.previous);
        assert!(!outcome.just_completed);

        // A later rising edge fires again.
        let outcome = progress.apply_toggle(&plan, 5, true);
        assert!(outcome.just_completed);
    }

    #[test]
    fn test_toggle_mid_roadmap_does_not_fire() {
        let plan = roadmap("Rust", 5);
        let mut progress = ProgressIndex::new();
        let outcome = progress.apply_toggle(&plan, 2, true);
        assert!(!outcome.just_completed);
    }

    #[test]
    fn test_out_of_plan_day_does_not_inflate_progress() {
        let plan = roadmap("Rust", 3);
        let mut progress = ProgressIndex::new();
        progress.set("Rust", 1, true);
        progress.set("Rust", 2, true);

        // A day number outside the plan neither completes the roadmap nor
        // moves the percentage.
        let outcome = progress.apply_toggle(&plan, 99, true);
        assert!(!outcome.just_completed);
        assert_eq!(percent_complete(&plan, &progress), 67);
        assert!(!progress.is_complete(&plan));

        // The real final day still completes it, stray entries and all.
        let outcome = progress.apply_toggle(&plan, 3, true);
        assert!(outcome.just_completed);
        assert_eq!(percent_complete(&plan, &progress), 100);

        // A stray rising edge after completion does not fire either.
        progress.set("Rust", 99, false);
        let outcome = progress.apply_toggle(&plan, 99, true);
        assert!(!outcome.just_completed);
    }

    #[test]
    fn test_wire_form_uses_string_day_keys() {
        let progress: ProgressIndex =
            serde_json::from_value(serde_json::json!({ "Rust": { "1": true, "2": false } }))
                .unwrap();
        assert!(progress.is_done("Rust", 1));
        assert!(!progress.is_done("Rust", 2));
        assert_eq!(progress.completed_days(&roadmap("Rust", 2)), 1);
    }
}
