//! Language-model coach client.
//!
//! One attempt per call, no retry, and a deterministic fallback for every
//! operation: a failed or malformed response can slow the user down, never
//! stop them. Nothing is retained between calls, and a second call for the
//! same profile may legitimately return a different plan.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::journal::JournalEntry;
use crate::plan::{FastingPlan, PlanType};
use crate::profile::UserProfile;
use crate::storage::CoachConfig;

/// Fixed encouragement returned when advice generation fails.
pub const FALLBACK_ADVICE: &str = "Keep going! You're doing great with your fasting journey.";

const PLAN_SYSTEM_PROMPT: &str = r#"You are an expert intermittent fasting coach. Create a personalized fasting schedule based on user profile. Return only a JSON object with:
{
  "fastingHours": number (12-24),
  "eatingHours": number (8-12),
  "startTime": "HH:MM",
  "endTime": "HH:MM",
  "planType": "16:8" | "14:10" | "18:6" | "OMAD",
  "reasoning": "brief explanation"
}"#;

const ADVICE_SYSTEM_PROMPT: &str = "You are a supportive intermittent fasting coach. Provide brief, encouraging advice based on user's mood and energy. Keep responses under 150 words and be empathetic.";

/// The mood context sent with an advice request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSnapshot {
    pub mood: String,
    pub energy: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub plan_type: PlanType,
}

impl MoodSnapshot {
    pub fn from_entry(entry: &JournalEntry, plan: &FastingPlan) -> Self {
        Self {
            mood: entry.mood.clone(),
            energy: entry.energy,
            notes: entry.notes.clone(),
            plan_type: plan.plan_type,
        }
    }
}

/// Client for the chat-completion and transcription endpoints.
pub struct CoachClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
    transcription_url: String,
    transcription_model: String,
}

impl CoachClient {
    /// Build a client against an explicit endpoint (tests point this at a
    /// local mock server).
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            transcription_url: "https://api.openai.com/v1/audio/transcriptions".into(),
            transcription_model: "whisper-1".into(),
        }
    }

    /// Build a client from configuration; the API key comes from the env var
    /// the config names (empty when unset -- requests then fail and fall
    /// back).
    pub fn from_config(cfg: &CoachConfig) -> Self {
        let api_key = std::env::var(&cfg.api_key_env).unwrap_or_default();
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(cfg.request_timeout_secs))
                .build()
                .unwrap_or_default(),
            base_url: cfg.base_url.clone(),
            model: cfg.model.clone(),
            api_key,
            transcription_url: cfg.transcription_url.clone(),
            transcription_model: cfg.transcription_model.clone(),
        }
    }

    /// Generate a fasting plan for `profile`.
    ///
    /// Total: any failure (network, non-JSON content, schema mismatch)
    /// yields [`FastingPlan::fallback`].
    pub async fn generate_plan(&self, profile: &UserProfile) -> FastingPlan {
        let prompt = format!(
            "Create a fasting plan for: Age {}, {}, {}lbs, Goal: {}, Wakes at {}, Sleeps at {}",
            profile.age,
            profile.gender,
            profile.weight,
            profile.goal,
            profile.preferred_wake_time,
            profile.preferred_sleep_time,
        );

        match self.chat(PLAN_SYSTEM_PROMPT, &prompt, 0.7).await {
            Some(content) => FastingPlan::parse_lenient(&content).unwrap_or_else(|| {
                debug!("plan response failed schema validation, using fallback");
                FastingPlan::fallback()
            }),
            None => {
                debug!("plan request failed, using fallback");
                FastingPlan::fallback()
            }
        }
    }

    /// Coaching advice for the given mood. Falls back to
    /// [`FALLBACK_ADVICE`].
    pub async fn coaching_advice(&self, snapshot: &MoodSnapshot) -> String {
        let prompt = format!(
            "Current mood: {}, Energy level: {}/10, Notes: {}, Current plan: {}",
            snapshot.mood,
            snapshot.energy,
            snapshot.notes.as_deref().unwrap_or("None"),
            snapshot.plan_type,
        );

        match self.chat(ADVICE_SYSTEM_PROMPT, &prompt, 0.8).await {
            Some(content) if !content.trim().is_empty() => content,
            _ => {
                debug!("advice request failed, using fallback");
                FALLBACK_ADVICE.to_string()
            }
        }
    }

    /// Transcribe recorded audio. Empty string on any failure.
    pub async fn transcribe_voice(&self, audio: Vec<u8>) -> String {
        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio).file_name("audio.webm"),
            )
            .text("model", self.transcription_model.clone());

        let result: Option<serde_json::Value> = async {
            self.http
                .post(&self.transcription_url)
                .bearer_auth(&self.api_key)
                .multipart(form)
                .send()
                .await
                .ok()?
                .json()
                .await
                .ok()
        }
        .await;

        result
            .and_then(|body| body.get("text").and_then(|t| t.as_str()).map(str::to_owned))
            .unwrap_or_default()
    }

    /// One chat-completion round trip; `None` on any transport or shape
    /// failure.
    async fn chat(&self, system: &str, user: &str, temperature: f64) -> Option<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": temperature,
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "coach endpoint returned error status");
            return None;
        }

        let body: serde_json::Value = response.json().await.ok()?;
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_owned)
    }
}
