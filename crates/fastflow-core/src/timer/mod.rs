//! Fasting timer: session records, the state machine, and progress math.

pub mod progress;
mod session;
mod tracker;

pub use progress::{format_duration, format_elapsed, progress_pct};
pub use session::{FastingSession, SessionStatus};
pub use tracker::FastTracker;
