//! Optimistic day-toggle tracking.
//!
//! The tracker holds the user's current roadmap record and applies day
//! toggles optimistically: the local progress index changes first, the
//! backend is asked to persist, and a failed persist rolls the local change
//! back. While a toggle for a given (technology, day) pair is awaiting its
//! acknowledgement, further toggles of that same pair are rejected so a
//! double-click cannot race its own persist.

use std::collections::HashSet;

use async_trait::async_trait;
use skillpath_api::{ApiError, BackendClient};
use skillpath_core::{overall_percent, percent_complete, RoadmapId, RoadmapRecord};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Error type for toggle operations.
#[derive(Debug, thiserror::Error)]
pub enum ToggleError {
    /// The record has no roadmap for the named technology
    #[error("no roadmap for technology: {0}")]
    UnknownTechStack(String),

    /// The roadmap's daily plan has no such day
    #[error("no day {day} in the {tech_stack} roadmap")]
    UnknownDay {
        /// Technology
        tech_stack: String,
        /// Day number
        day: u32,
    },

    /// A toggle for the same day is still awaiting its acknowledgement
    #[error("toggle for {tech_stack} day {day} is already in flight")]
    InFlight {
        /// Technology
        tech_stack: String,
        /// Day number
        day: u32,
    },

    /// The backend refused or failed to persist the toggle
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Outcome of a successfully persisted toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleReceipt {
    /// The day's new completion value
    pub completed: bool,

    /// True iff this toggle brought its roadmap to exactly 100%
    pub just_completed: bool,
}

/// Persistence seam for day toggles.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Persist one toggle. An error means the toggle must be rolled back.
    async fn persist_toggle(
        &self,
        roadmap_id: &RoadmapId,
        tech_stack: &str,
        day: u32,
        completed: bool,
    ) -> skillpath_api::Result<()>;
}

#[async_trait]
impl ProgressSink for BackendClient {
    async fn persist_toggle(
        &self,
        roadmap_id: &RoadmapId,
        tech_stack: &str,
        day: u32,
        completed: bool,
    ) -> skillpath_api::Result<()> {
        self.update_progress(roadmap_id, tech_stack, day, completed)
            .await
    }
}

struct TrackerState {
    record: RoadmapRecord,
    in_flight: HashSet<(String, u32)>,
}

/// Tracks progress against one roadmap record.
pub struct RoadmapTracker<S: ProgressSink> {
    sink: S,
    state: Mutex<TrackerState>,
}

impl<S: ProgressSink> RoadmapTracker<S> {
    /// Create a tracker over a loaded record.
    pub fn new(record: RoadmapRecord, sink: S) -> Self {
        Self {
            sink,
            state: Mutex::new(TrackerState {
                record,
                in_flight: HashSet::new(),
            }),
        }
    }

    /// Snapshot of the current record, local toggles included.
    pub async fn record(&self) -> RoadmapRecord {
        self.state.lock().await.record.clone()
    }

    /// Replace the record, e.g. after a refetch. In-flight markers survive.
    pub async fn reload(&self, record: RoadmapRecord) {
        self.state.lock().await.record = record;
    }

    /// Completion percentage for one technology, or `None` when the record
    /// has no roadmap for it.
    pub async fn percent(&self, tech_stack: &str) -> Option<u8> {
        let state = self.state.lock().await;
        state
            .record
            .roadmap(tech_stack)
            .map(|roadmap| percent_complete(roadmap, &state.record.progress))
    }

    /// Completion percentage across every roadmap in the record.
    pub async fn overall_percent(&self) -> u8 {
        let state = self.state.lock().await;
        overall_percent(&state.record.roadmaps, &state.record.progress)
    }

    /// Whether a day is currently marked done.
    pub async fn is_done(&self, tech_stack: &str, day: u32) -> bool {
        self.state.lock().await.record.progress.is_done(tech_stack, day)
    }

    /// Flip one day's completion state and persist it.
    ///
    /// Only days present in the roadmap's daily plan can be toggled.
    /// The local index is updated before the sink call and rolled back if
    /// the sink fails, so the returned receipt always describes persisted
    /// state.
    pub async fn toggle(&self, tech_stack: &str, day: u32) -> Result<ToggleReceipt, ToggleError> {
        let key = (tech_stack.to_string(), day);

        // Apply optimistically, marking the pair in flight before the await.
        let (roadmap_id, completed, outcome) = {
            let mut state = self.state.lock().await;
            let roadmap = state
                .record
                .roadmap(tech_stack)
                .ok_or_else(|| ToggleError::UnknownTechStack(tech_stack.to_string()))?
                .clone();
            if !roadmap.daily_plan.iter().any(|d| d.day == day) {
                return Err(ToggleError::UnknownDay {
                    tech_stack: tech_stack.to_string(),
                    day,
                });
            }
            if state.in_flight.contains(&key) {
                return Err(ToggleError::InFlight {
                    tech_stack: tech_stack.to_string(),
                    day,
                });
            }

            let completed = !state.record.progress.is_done(tech_stack, day);
            let outcome = state.record.progress.apply_toggle(&roadmap, day, completed);
            state.in_flight.insert(key.clone());
            (state.record.id.clone(), completed, outcome)
        };

        let persisted = self
            .sink
            .persist_toggle(&roadmap_id, tech_stack, day, completed)
            .await;

        let mut state = self.state.lock().await;
        state.in_flight.remove(&key);

        match persisted {
            Ok(()) => {
                debug!("Toggled {} day {} -> {}", tech_stack, day, completed);
                Ok(ToggleReceipt {
                    completed,
                    just_completed: outcome.just_completed,
                })
            }
            Err(err) => {
                // Roll the optimistic change back.
                warn!("Persist failed for {} day {}, reverting: {}", tech_stack, day, err);
                state.record.progress.set(tech_stack, day, outcome.previous);
                Err(ToggleError::Api(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillpath_core::{DayPlan, Roadmap, SkillLevel};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct OkSink {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProgressSink for OkSink {
        async fn persist_toggle(
            &self,
            _roadmap_id: &RoadmapId,
            _tech_stack: &str,
            _day: u32,
            _completed: bool,
        ) -> skillpath_api::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl ProgressSink for FailingSink {
        async fn persist_toggle(
            &self,
            _roadmap_id: &RoadmapId,
            _tech_stack: &str,
            _day: u32,
            _completed: bool,
        ) -> skillpath_api::Result<()> {
            Err(ApiError::Status {
                status: 500,
                message: "boom".to_string(),
            })
        }
    }

    fn record(tech_stack: &str, days: u32) -> RoadmapRecord {
        RoadmapRecord {
            id: RoadmapId::new("rm-1"),
            roadmaps: vec![Roadmap {
                tech_stack: tech_stack.to_string(),
                overview: String::new(),
                duration_days: days,
                skill_level: SkillLevel::Beginner,
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
            }],
            progress: Default::default(),
            start_date: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_toggle_persists_and_flips_state() {
        let tracker = RoadmapTracker::new(
            record("Rust", 3),
            OkSink {
                calls: AtomicUsize::new(0),
            },
        );

        let receipt = tracker.toggle("Rust", 1).await.unwrap();
        assert!(receipt.completed);
        assert!(!receipt.just_completed);
        assert!(tracker.is_done("Rust", 1).await);
        assert_eq!(tracker.percent("Rust").await, Some(33));

        // Toggling again flips it off.
        let receipt = tracker.toggle("Rust", 1).await.unwrap();
        assert!(!receipt.completed);
        assert!(!tracker.is_done("Rust", 1).await);
        assert_eq!(tracker.sink.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_persist_rolls_back() {
        let tracker = RoadmapTracker::new(record("Rust", 3), FailingSink);

        let err = tracker.toggle("Rust", 1).await.unwrap_err();
        assert!(matches!(err, ToggleError::Api(_)));
        assert!(!tracker.is_done("Rust", 1).await);
        assert_eq!(tracker.percent("Rust").await, Some(0));

        // The pair is no longer in flight, so a retry is allowed.
        assert!(tracker.toggle("Rust", 1).await.is_err());
    }

    #[tokio::test]
    async fn test_last_day_reports_completion() {
        let tracker = RoadmapTracker::new(
            record("Rust", 2),
            OkSink {
                calls: AtomicUsize::new(0),
            },
        );

        assert!(!tracker.toggle("Rust", 1).await.unwrap().just_completed);
        let receipt = tracker.toggle("Rust", 2).await.unwrap();
        assert!(receipt.just_completed);
        assert_eq!(tracker.overall_percent().await, 100);
    }

    #[tokio::test]
    async fn test_out_of_plan_day_is_rejected() {
        let tracker = RoadmapTracker::new(
            record("Rust", 3),
            OkSink {
                calls: AtomicUsize::new(0),
            },
        );

        let err = tracker.toggle("Rust", 99).await.unwrap_err();
        assert!(matches!(err, ToggleError::UnknownDay { day: 99, .. }));

        // Nothing was applied or persisted.
        assert!(!tracker.is_done("Rust", 99).await);
        assert_eq!(tracker.percent("Rust").await, Some(0));
        assert_eq!(tracker.sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_tech_stack_is_rejected() {
        let tracker = RoadmapTracker::new(
            record("Rust", 2),
            OkSink {
                calls: AtomicUsize::new(0),
            },
        );
        let err = tracker.toggle("Go", 1).await.unwrap_err();
        assert!(matches!(err, ToggleError::UnknownTechStack(_)));
        assert_eq!(tracker.sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_in_flight_pair_rejects_second_toggle() {
        // A sink that parks until told to proceed, holding the pair in flight.
        struct ParkedSink {
            release: Mutex<Option<tokio::sync::oneshot::Receiver<()>>>,
        }

        #[async_trait]
        impl ProgressSink for ParkedSink {
            async fn persist_toggle(
                &self,
                _roadmap_id: &RoadmapId,
                _tech_stack: &str,
                _day: u32,
                _completed: bool,
            ) -> skillpath_api::Result<()> {
                let receiver = self.release.lock().await.take();
                if let Some(receiver) = receiver {
                    let _ = receiver.await;
                }
                Ok(())
            }
        }

        let (sender, receiver) = tokio::sync::oneshot::channel();
        let tracker = std::sync::Arc::new(RoadmapTracker::new(
            record("Rust", 3),
            ParkedSink {
                release: Mutex::new(Some(receiver)),
            },
        ));

        let first = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.toggle("Rust", 1).await })
        };

        // Wait until the first toggle has marked the pair in flight.
        loop {
            if tracker.is_done("Rust", 1).await {
                break;
            }
            tokio::task::yield_now().await;
        }

        let second = tracker.toggle("Rust", 1).await;
        assert!(matches!(second, Err(ToggleError::InFlight { .. })));

        // A different day is independent.
        assert!(tracker.toggle("Rust", 2).await.is_ok());

        sender.send(()).ok();
        assert!(first.await.unwrap().is_ok());
    }
}
