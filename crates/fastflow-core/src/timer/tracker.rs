//! Fasting session state machine.
//!
//! Wall-clock based, no internal threads: the caller drives display updates
//! by asking for a [`snapshot`](FastTracker::snapshot) on its own tick.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Active -> (Completed | Broken)
//! ```
//!
//! Completed and Broken are terminal for a session; the tracker returns to
//! Idle. At most one session per user is active at any time -- `start`
//! rejects the call outright while an active session exists, rather than
//! trusting callers to check first.

use chrono::Utc;

use crate::error::ValidationError;
use crate::events::Event;
use crate::profile::UserProfile;
use crate::storage::{Store, StoreBackend, SESSIONS_KEY};

use super::progress::{format_elapsed, progress_pct};
use super::session::{FastingSession, SessionStatus};

const MS_PER_HOUR: u64 = 60 * 60 * 1000;

/// Core fasting state machine over an injected store.
///
/// The id of the active session is cached at load time (one scan) and
/// maintained explicitly across transitions, so queries never rescan the
/// session list.
pub struct FastTracker<'a, B: StoreBackend> {
    store: &'a Store<B>,
    current_id: Option<String>,
}

impl<'a, B: StoreBackend> FastTracker<'a, B> {
    /// Load tracker state from the store.
    pub fn load(store: &'a Store<B>) -> Self {
        let current_id = store
            .get::<Vec<FastingSession>>(SESSIONS_KEY)
            .unwrap_or_default()
            .iter()
            .find(|s| s.is_active())
            .map(|s| s.session_id.clone());
        Self { store, current_id }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.current_id.is_some()
    }

    /// The single not-yet-stopped session, if any.
    pub fn current_session(&self) -> Option<FastingSession> {
        let id = self.current_id.as_ref()?;
        self.store
            .get::<Vec<FastingSession>>(SESSIONS_KEY)?
            .into_iter()
            .find(|s| &s.session_id == id)
    }

    /// All recorded sessions, oldest first.
    pub fn sessions(&self) -> Vec<FastingSession> {
        self.store.get(SESSIONS_KEY).unwrap_or_default()
    }

    /// Build a display snapshot at `now_ms`. Never writes.
    pub fn snapshot(&self, now_ms: u64) -> Event {
        match self.current_session() {
            Some(session) => {
                let elapsed_ms = session.elapsed_ms(now_ms);
                Event::StateSnapshot {
                    status: Some(session.status),
                    elapsed_ms,
                    remaining_ms: session.remaining_ms(now_ms),
                    progress_pct: progress_pct(
                        session.start_time,
                        now_ms,
                        session.planned_window_end,
                    ),
                    elapsed_display: format_elapsed(elapsed_ms / 1000),
                    at: Utc::now(),
                }
            }
            None => Event::StateSnapshot {
                status: None,
                elapsed_ms: 0,
                remaining_ms: 0,
                progress_pct: 0.0,
                elapsed_display: format_elapsed(0),
                at: Utc::now(),
            },
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new fast for `user`.
    ///
    /// The planned window runs from now for the profile's plan hours
    /// (16 without a plan).
    ///
    /// # Errors
    /// Rejects with [`ValidationError::SessionAlreadyActive`] while any
    /// session is still active, preserving the at-most-one-active invariant.
    pub fn start(&mut self, user: &UserProfile) -> Result<Event, ValidationError> {
        // The stored list is authoritative: a stale cache must not let a
        // second active record slip in.
        if let Some(active) = self
            .sessions()
            .iter()
            .find(|s| s.is_active())
            .map(|s| s.session_id.clone())
        {
            self.current_id = Some(active.clone());
            return Err(ValidationError::SessionAlreadyActive { session_id: active });
        }

        let now = now_ms();
        let planned_hours = user.fasting_hours();
        let planned_end = now + u64::from(planned_hours) * MS_PER_HOUR;
        let session = FastingSession::begin(user.user_id.clone(), now, planned_end);
        let event = Event::FastStarted {
            session_id: session.session_id.clone(),
            planned_window_end: planned_end,
            planned_hours,
            at: Utc::now(),
        };

        self.current_id = Some(session.session_id.clone());
        self.store.append_to(SESSIONS_KEY, session);
        Ok(event)
    }

    /// Complete the active fast. `None` when idle.
    pub fn stop(&mut self) -> Option<Event> {
        self.finish(SessionStatus::Completed)
    }

    /// End the active fast early. `None` when idle.
    pub fn break_fast(&mut self) -> Option<Event> {
        self.finish(SessionStatus::Broken)
    }

    fn finish(&mut self, status: SessionStatus) -> Option<Event> {
        let session = self.current_session()?;
        let now = now_ms();
        let duration = now.saturating_sub(session.start_time);

        self.store.update_in::<FastingSession, _, _>(
            SESSIONS_KEY,
            |s| s.session_id == session.session_id,
            |s| {
                s.end_time = Some(now);
                s.duration = Some(duration);
                s.status = status;
            },
        );
        self.current_id = None;

        let at = Utc::now();
        Some(match status {
            SessionStatus::Broken => Event::FastBroken {
                session_id: session.session_id,
                duration_ms: duration,
                at,
            },
            _ => Event::FastCompleted {
                session_id: session.session_id,
                duration_ms: duration,
                at,
            },
        })
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Gender, Goal, OnboardingData, UserProfile};
    use crate::storage::MemoryBackend;

    fn user() -> UserProfile {
        UserProfile::from_onboarding(
            OnboardingData {
                age: 30,
                gender: Gender::Other,
                weight: 160.0,
                goal: Goal::GeneralHealth,
                wake_time: "07:00".into(),
                sleep_time: "23:00".into(),
            },
            None,
        )
        .unwrap()
    }

    fn store() -> Store<MemoryBackend> {
        Store::new(MemoryBackend::new())
    }

    #[test]
    fn start_creates_active_session_with_default_window() {
        let store = store();
        let mut tracker = FastTracker::load(&store);
        assert!(!tracker.is_active());

        let event = tracker.start(&user()).unwrap();
        assert!(tracker.is_active());

        let session = tracker.current_session().unwrap();
        assert!(session.is_active());
        assert_eq!(
            session.planned_window_end - session.planned_window_start,
            16 * MS_PER_HOUR
        );
        match event {
            Event::FastStarted { planned_hours, .. } => assert_eq!(planned_hours, 16),
            other => panic!("expected FastStarted, got {other:?}"),
        }
    }

    #[test]
    fn second_start_is_rejected_while_active() {
        let store = store();
        let mut tracker = FastTracker::load(&store);
        tracker.start(&user()).unwrap();

        let err = tracker.start(&user()).unwrap_err();
        assert!(matches!(err, ValidationError::SessionAlreadyActive { .. }));

        let active = tracker.sessions().iter().filter(|s| s.is_active()).count();
        assert_eq!(active, 1);
    }

    #[test]
    fn stale_tracker_cannot_violate_single_active_invariant() {
        let store = store();
        let mut first = FastTracker::load(&store);
        first.start(&user()).unwrap();

        // A tracker loaded before the start has an empty cache; the stored
        // list still rejects it.
        let mut stale = FastTracker { store: &store, current_id: None };
        assert!(stale.start(&user()).is_err());
        assert_eq!(stale.sessions().iter().filter(|s| s.is_active()).count(), 1);
    }

    #[test]
    fn stop_completes_with_exact_duration() {
        let store = store();
        let mut tracker = FastTracker::load(&store);
        tracker.start(&user()).unwrap();

        let event = tracker.stop().unwrap();
        assert!(!tracker.is_active());
        assert!(matches!(event, Event::FastCompleted { .. }));

        let sessions = tracker.sessions();
        assert_eq!(sessions.len(), 1);
        let s = &sessions[0];
        assert_eq!(s.status, SessionStatus::Completed);
        assert_eq!(s.duration.unwrap(), s.end_time.unwrap() - s.start_time);
    }

    #[test]
    fn stop_when_idle_is_none() {
        let store = store();
        let mut tracker = FastTracker::load(&store);
        assert!(tracker.stop().is_none());
    }

    #[test]
    fn completed_session_stays_completed_after_restart() {
        let store = store();
        let mut tracker = FastTracker::load(&store);
        tracker.start(&user()).unwrap();
        tracker.stop().unwrap();

        let reloaded = FastTracker::load(&store);
        assert!(!reloaded.is_active());
        assert_eq!(reloaded.sessions()[0].status, SessionStatus::Completed);
    }

    #[test]
    fn break_fast_marks_session_broken() {
        let store = store();
        let mut tracker = FastTracker::load(&store);
        tracker.start(&user()).unwrap();

        let event = tracker.break_fast().unwrap();
        assert!(matches!(event, Event::FastBroken { .. }));
        assert_eq!(tracker.sessions()[0].status, SessionStatus::Broken);
        assert!(!tracker.is_active());
    }

    #[test]
    fn load_resumes_active_session_from_store() {
        let store = store();
        {
            let mut tracker = FastTracker::load(&store);
            tracker.start(&user()).unwrap();
        }
        let tracker = FastTracker::load(&store);
        assert!(tracker.is_active());
        assert!(tracker.current_session().unwrap().is_active());
    }

    #[test]
    fn snapshot_is_idle_shaped_without_session() {
        let store = store();
        let tracker = FastTracker::load(&store);
        match tracker.snapshot(now_ms()) {
            Event::StateSnapshot { status, elapsed_ms, progress_pct, .. } => {
                assert!(status.is_none());
                assert_eq!(elapsed_ms, 0);
                assert_eq!(progress_pct, 0.0);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_reports_progress_without_mutating() {
        let store = store();
        let mut tracker = FastTracker::load(&store);
        tracker.start(&user()).unwrap();
        let session = tracker.current_session().unwrap();

        let midpoint = session.start_time + 8 * MS_PER_HOUR;
        match tracker.snapshot(midpoint) {
            Event::StateSnapshot { progress_pct, elapsed_ms, .. } => {
                assert!((progress_pct - 50.0).abs() < 0.01);
                assert_eq!(elapsed_ms, 8 * MS_PER_HOUR);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
        // Tick did not write anything.
        assert!(tracker.current_session().unwrap().is_active());
        assert!(tracker.sessions()[0].end_time.is_none());
    }

    #[test]
    fn clear_then_start_behaves_as_first_ever() {
        let store = store();
        let mut tracker = FastTracker::load(&store);
        tracker.start(&user()).unwrap();
        tracker.stop().unwrap();

        store.clear_all();

        let mut fresh = FastTracker::load(&store);
        assert!(fresh.sessions().is_empty());
        fresh.start(&user()).unwrap();
        assert_eq!(fresh.sessions().len(), 1);
    }
}
