use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::PlanType;
use crate::timer::SessionStatus;

/// Every state change in the system produces an Event.
/// The CLI prints them; a GUI layer would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    FastStarted {
        session_id: String,
        planned_window_end: u64,
        planned_hours: u8,
        at: DateTime<Utc>,
    },
    FastCompleted {
        session_id: String,
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    /// Fast ended early under an early-termination policy.
    FastBroken {
        session_id: String,
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    EntryRecorded {
        entry_id: String,
        mood: String,
        energy: u8,
        at: DateTime<Utc>,
    },
    PlanGenerated {
        plan_type: PlanType,
        fasting_hours: u8,
        at: DateTime<Utc>,
    },
    /// Non-mutating tick snapshot of the current fast, if any.
    StateSnapshot {
        status: Option<SessionStatus>,
        elapsed_ms: u64,
        remaining_ms: u64,
        progress_pct: f64,
        elapsed_display: String,
        at: DateTime<Utc>,
    },
}
