use clap::Subcommand;
use fastflow_core::storage::USER_KEY;
use fastflow_core::{Config, MoodRecorder, UserProfile};

use super::open_store;

#[derive(Subcommand)]
pub enum JournalAction {
    /// Record how you're feeling
    Add {
        /// Free text, e.g. "feeling good, energy around 7"
        text: String,
    },
    /// List journal entries, newest first
    List {
        /// Show every entry instead of the recent window
        #[arg(long)]
        all: bool,
    },
}

pub fn run(action: JournalAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let recorder = MoodRecorder::new(&store);

    match action {
        JournalAction::Add { text } => {
            let user: UserProfile = store
                .get(USER_KEY)
                .ok_or("no profile found; run `fastflow onboard` first")?;
            let entry = recorder.submit(&user, &text);
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        JournalAction::List { all } => {
            let entries = if all {
                let mut entries = recorder.entries();
                entries.reverse();
                entries
            } else {
                let cfg = Config::load_or_default();
                recorder.recent(cfg.journal.recent_entries)
            };
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
