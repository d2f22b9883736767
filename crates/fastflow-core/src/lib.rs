//! # FastFlow Core Library
//!
//! This library provides the core business logic for FastFlow, an
//! intermittent-fasting companion. All operations are available through the
//! standalone CLI binary; any GUI layer is a thin shell over the same
//! library.
//!
//! ## Architecture
//!
//! - **Fast Tracker**: a wall-clock-based state machine for the single
//!   current fasting session; callers drive display updates by requesting
//!   snapshots on their own tick
//! - **Storage**: an injected key-value gateway over three JSON records
//!   (profile, sessions, journal), SQLite-backed in production and
//!   memory-backed in tests, plus TOML-based configuration
//! - **Journal**: free-text mood/energy extraction and append-only entries
//! - **Coach**: language-model adapter for plan generation and coaching
//!   advice with deterministic fallbacks
//!
//! ## Key Components
//!
//! - [`FastTracker`]: fasting session state machine
//! - [`Store`]: persistence gateway
//! - [`MoodRecorder`]: journal recorder
//! - [`CoachClient`]: plan/advice/transcription adapter
//! - [`Config`]: application configuration management

pub mod coach;
pub mod error;
pub mod events;
pub mod journal;
pub mod plan;
pub mod profile;
pub mod stats;
pub mod storage;
pub mod timer;

pub use coach::{CoachClient, MoodSnapshot, FALLBACK_ADVICE};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use journal::{JournalEntry, MoodRecorder};
pub use plan::{FastingPlan, PlanType};
pub use profile::{Gender, Goal, OnboardingData, SubscriptionTier, UserProfile};
pub use stats::{MoodTrend, ProgressStats};
pub use storage::{Config, MemoryBackend, SqliteBackend, Store};
pub use timer::{FastTracker, FastingSession, SessionStatus};
