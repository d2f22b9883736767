//! Fasting session records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a fasting session.
///
/// `Active` is the only non-terminal status; a stopped session never
/// re-activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
    Broken,
}

/// A timed fasting interval.
///
/// Records persist as camelCase JSON inside the session list; sessions are
/// mutated in place when stopped and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastingSession {
    pub session_id: String,
    pub user_id: String,
    /// Epoch milliseconds.
    pub start_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    /// Milliseconds fasted, set when the session ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    pub planned_window_start: u64,
    pub planned_window_end: u64,
    pub status: SessionStatus,
}

impl FastingSession {
    /// Create a new active session starting at `now_ms`.
    pub fn begin(user_id: impl Into<String>, now_ms: u64, planned_end_ms: u64) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            start_time: now_ms,
            end_time: None,
            duration: None,
            planned_window_start: now_ms,
            planned_window_end: planned_end_ms,
            status: SessionStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Milliseconds elapsed at `now_ms` (zero before the start).
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_time)
    }

    /// Milliseconds of planned window remaining at `now_ms`.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.planned_window_end.saturating_sub(now_ms)
    }
}
