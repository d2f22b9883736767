use clap::Subcommand;
use fastflow_core::storage::USER_KEY;
use fastflow_core::{CoachClient, Config, FastingPlan, MoodRecorder, MoodSnapshot, UserProfile};

use super::open_store;

#[derive(Subcommand)]
pub enum CoachAction {
    /// Generate a fresh fasting plan and store it on the profile
    Plan,
    /// Coaching advice based on the latest journal entry
    Advice,
}

pub fn run(action: CoachAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let mut user: UserProfile = store
        .get(USER_KEY)
        .ok_or("no profile found; run `fastflow onboard` first")?;

    let cfg = Config::load_or_default();
    let client = CoachClient::from_config(&cfg.coach);
    let runtime = tokio::runtime::Runtime::new()?;

    match action {
        CoachAction::Plan => {
            let plan = runtime.block_on(client.generate_plan(&user));
            user.set_plan(plan.clone());
            store.set(USER_KEY, &user);
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        CoachAction::Advice => {
            let plan = user
                .current_fasting_plan
                .clone()
                .unwrap_or_else(FastingPlan::fallback);
            let snapshot = match MoodRecorder::new(&store).recent(1).into_iter().next() {
                Some(entry) => MoodSnapshot::from_entry(&entry, &plan),
                None => MoodSnapshot {
                    mood: "neutral".into(),
                    energy: 5,
                    notes: None,
                    plan_type: plan.plan_type,
                },
            };
            let advice = runtime.block_on(client.coaching_advice(&snapshot));
            println!("{advice}");
        }
    }
    Ok(())
}
