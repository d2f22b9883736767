//! Progress aggregates for the stats view.
//!
//! Pure read-only computation over the session and journal collections;
//! nothing here writes to the store.

use serde::{Deserialize, Serialize};

use crate::journal::JournalEntry;
use crate::profile::UserProfile;
use crate::timer::{FastingSession, SessionStatus};

const WEEK_MS: u64 = 7 * 24 * 60 * 60 * 1000;
const MS_PER_HOUR: f64 = 3_600_000.0;

/// Direction of the recent mood/energy trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    Up,
    Down,
    Flat,
}

/// Display aggregates for the progress view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_sessions: u64,
    pub completed_sessions: u64,
    pub broken_sessions: u64,
    /// Hours fasted across all finished sessions.
    pub total_fasted_hours: f64,
    /// Hours fasted in the trailing seven days.
    pub week_fasted_hours: f64,
    /// Weekly goal: plan fasting hours x 7.
    pub week_target_hours: f64,
    /// Mean journal energy, when any entries exist.
    pub average_energy: Option<f64>,
    pub mood_trend: MoodTrend,
}

/// Compute stats at `now_ms` from the two collections.
pub fn compute(
    sessions: &[FastingSession],
    entries: &[JournalEntry],
    profile: Option<&UserProfile>,
    now_ms: u64,
) -> ProgressStats {
    let week_start = now_ms.saturating_sub(WEEK_MS);

    let mut completed = 0u64;
    let mut broken = 0u64;
    let mut total_ms = 0u64;
    let mut week_ms = 0u64;

    for session in sessions {
        match session.status {
            SessionStatus::Completed => completed += 1,
            SessionStatus::Broken => broken += 1,
            SessionStatus::Active => {}
        }
        if let (Some(end), Some(duration)) = (session.end_time, session.duration) {
            total_ms += duration;
            if end >= week_start {
                week_ms += duration;
            }
        }
    }

    let plan_hours = profile.map(|p| p.fasting_hours()).unwrap_or(16);

    ProgressStats {
        total_sessions: sessions.len() as u64,
        completed_sessions: completed,
        broken_sessions: broken,
        total_fasted_hours: total_ms as f64 / MS_PER_HOUR,
        week_fasted_hours: week_ms as f64 / MS_PER_HOUR,
        week_target_hours: f64::from(plan_hours) * 7.0,
        average_energy: average_energy(entries),
        mood_trend: mood_trend(entries),
    }
}

fn average_energy(entries: &[JournalEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let sum: u64 = entries.iter().map(|e| u64::from(e.energy)).sum();
    Some(sum as f64 / entries.len() as f64)
}

/// Compare the newer half of the journal against the older half.
fn mood_trend(entries: &[JournalEntry]) -> MoodTrend {
    if entries.len() < 2 {
        return MoodTrend::Flat;
    }
    let mid = entries.len() / 2;
    let older = average_energy(&entries[..mid]).unwrap_or(0.0);
    let newer = average_energy(&entries[mid..]).unwrap_or(0.0);

    if newer - older > 0.5 {
        MoodTrend::Up
    } else if older - newer > 0.5 {
        MoodTrend::Down
    } else {
        MoodTrend::Flat
    }
}
