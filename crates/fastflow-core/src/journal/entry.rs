//! Journal entry records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A timestamped mood/energy record.
///
/// Entries are append-only: created on each mood submission, never mutated
/// or deleted. Persisted as camelCase JSON inside the journal list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub entry_id: String,
    pub user_id: String,
    /// Epoch milliseconds.
    pub timestamp: u64,
    pub mood: String,
    /// 1-10.
    pub energy: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_recording_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
}

impl JournalEntry {
    pub fn new(
        user_id: impl Into<String>,
        timestamp: u64,
        mood: impl Into<String>,
        energy: u8,
        notes: Option<String>,
    ) -> Self {
        Self {
            entry_id: format!("entry_{}", Uuid::new_v4()),
            user_id: user_id.into(),
            timestamp,
            mood: mood.into(),
            energy,
            notes,
            voice_recording_url: None,
            transcription: None,
        }
    }

    /// Attach the voice recording this entry was transcribed from.
    pub fn with_voice(mut self, url: impl Into<String>, transcription: impl Into<String>) -> Self {
        self.voice_recording_url = Some(url.into());
        self.transcription = Some(transcription.into());
        self
    }
}
