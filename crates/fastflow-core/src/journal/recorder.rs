//! Journal recorder: turns free text into persisted entries.

use crate::profile::UserProfile;
use crate::storage::{Store, StoreBackend, JOURNAL_KEY};

use super::entry::JournalEntry;
use super::mood::detect;

/// Append-only mood recorder over an injected store.
pub struct MoodRecorder<'a, B: StoreBackend> {
    store: &'a Store<B>,
}

impl<'a, B: StoreBackend> MoodRecorder<'a, B> {
    pub fn new(store: &'a Store<B>) -> Self {
        Self { store }
    }

    /// Record a typed message: detect (mood, energy), keep the raw text as
    /// notes, append.
    pub fn submit(&self, user: &UserProfile, raw_text: &str) -> JournalEntry {
        let detected = detect(raw_text);
        let entry = JournalEntry::new(
            user.user_id.clone(),
            now_ms(),
            detected.mood,
            detected.energy,
            Some(raw_text.to_string()),
        );
        self.store.append_to(JOURNAL_KEY, entry.clone());
        entry
    }

    /// Record a transcribed voice message. Detection runs on the
    /// transcription; the recording reference is kept on the entry.
    pub fn submit_transcribed(
        &self,
        user: &UserProfile,
        recording_url: &str,
        transcription: &str,
    ) -> JournalEntry {
        let detected = detect(transcription);
        let entry = JournalEntry::new(
            user.user_id.clone(),
            now_ms(),
            detected.mood,
            detected.energy,
            Some(transcription.to_string()),
        )
        .with_voice(recording_url, transcription);
        self.store.append_to(JOURNAL_KEY, entry.clone());
        entry
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.store.get(JOURNAL_KEY).unwrap_or_default()
    }

    /// The newest `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<JournalEntry> {
        let entries = self.entries();
        entries.into_iter().rev().take(limit).collect()
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
                gender: Gender::Male,
                weight: 180.0,
                goal: Goal::GutHealth,
                wake_time: "06:30".into(),
                sleep_time: "22:30".into(),
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn submit_detects_and_keeps_raw_text_as_notes() {
        let store = Store::new(MemoryBackend::new());
        let recorder = MoodRecorder::new(&store);
        let u = user();

        let entry = recorder.submit(&u, "I feel great today");
        assert_eq!(entry.mood, "great");
        assert_eq!(entry.energy, 9);
        assert_eq!(entry.notes.as_deref(), Some("I feel great today"));
        assert_eq!(entry.user_id, u.user_id);
    }

    #[test]
    fn entries_append_in_order_and_stay_immutable() {
        let store = Store::new(MemoryBackend::new());
        let recorder = MoodRecorder::new(&store);
        let u = user();

        let first = recorder.submit(&u, "feeling okay");
        recorder.submit(&u, "nothing special");
        recorder.submit(&u, "pretty bad honestly");

        let entries = recorder.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].entry_id, first.entry_id);
        assert_eq!(entries[0].mood, "okay");
        assert_eq!(entries[1].mood, "neutral");
        assert_eq!(entries[1].energy, 5);
        assert_eq!(entries[2].mood, "bad");
    }

    #[test]
    fn recent_is_newest_first_window() {
        let store = Store::new(MemoryBackend::new());
        let recorder = MoodRecorder::new(&store);
        let u = user();

        for i in 0..12 {
            recorder.submit(&u, &format!("day {i} was okay"));
        }

        let recent = recorder.recent(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].notes.as_deref(), Some("day 11 was okay"));
        assert_eq!(recent[9].notes.as_deref(), Some("day 2 was okay"));
    }

    #[test]
    fn transcribed_submission_keeps_recording_reference() {
        let store = Store::new(MemoryBackend::new());
        let recorder = MoodRecorder::new(&store);

        let entry = recorder.submit_transcribed(
            &user(),
            "blob:rec-7",
            "I'm feeling good today, energy level around 7",
        );
        assert_eq!(entry.mood, "good");
        assert_eq!(entry.energy, 7);
        assert_eq!(entry.voice_recording_url.as_deref(), Some("blob:rec-7"));
        assert_eq!(
            entry.transcription.as_deref(),
            Some("I'm feeling good today, energy level around 7")
        );
    }
}
