//! AI coach adapter: plan generation, coaching advice, voice transcription.

mod client;

pub use client::{CoachClient, MoodSnapshot, FALLBACK_ADVICE};
