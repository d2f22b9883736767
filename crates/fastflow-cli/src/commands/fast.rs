use clap::Subcommand;
use fastflow_core::storage::USER_KEY;
use fastflow_core::{FastTracker, UserProfile};

use super::{now_ms, open_store};

#[derive(Subcommand)]
pub enum FastAction {
    /// Start a new fast
    Start,
    /// Complete the current fast
    Stop,
    /// End the current fast early
    Break,
    /// Print the current fast state as JSON
    Status,
}

pub fn run(action: FastAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let mut tracker = FastTracker::load(&store);

    match action {
        FastAction::Start => {
            let user: UserProfile = store
                .get(USER_KEY)
                .ok_or("no profile found; run `fastflow onboard` first")?;
            let event = tracker.start(&user)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        FastAction::Stop => match tracker.stop() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => return Err("no active fast to stop".into()),
        },
        FastAction::Break => match tracker.break_fast() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => return Err("no active fast to break".into()),
        },
        FastAction::Status => {
            let snapshot = tracker.snapshot(now_ms());
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    Ok(())
}
