use fastflow_core::storage::{JOURNAL_KEY, SESSIONS_KEY, USER_KEY};
use fastflow_core::{stats, FastingSession, JournalEntry, UserProfile};

use super::{now_ms, open_store};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let sessions: Vec<FastingSession> = store.get(SESSIONS_KEY).unwrap_or_default();
    let entries: Vec<JournalEntry> = store.get(JOURNAL_KEY).unwrap_or_default();
    let profile: Option<UserProfile> = store.get(USER_KEY);

    let stats = stats::compute(&sessions, &entries, profile.as_ref(), now_ms());
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
