use clap::{Args, ValueEnum};
use fastflow_core::storage::USER_KEY;
use fastflow_core::{CoachClient, Config, Gender, Goal, OnboardingData, UserProfile};

use super::open_store;

#[derive(Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    Other,
}

impl From<GenderArg> for Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Other => Gender::Other,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GoalArg {
    WeightLoss,
    EnergyBoost,
    GutHealth,
    GeneralHealth,
}

impl From<GoalArg> for Goal {
    fn from(value: GoalArg) -> Self {
        match value {
            GoalArg::WeightLoss => Goal::WeightLoss,
            GoalArg::EnergyBoost => Goal::EnergyBoost,
            GoalArg::GutHealth => Goal::GutHealth,
            GoalArg::GeneralHealth => Goal::GeneralHealth,
        }
    }
}

#[derive(Args)]
pub struct OnboardArgs {
    #[arg(long)]
    age: u32,
    #[arg(long, value_enum)]
    gender: GenderArg,
    /// Weight in pounds
    #[arg(long)]
    weight: f64,
    #[arg(long, value_enum)]
    goal: GoalArg,
    /// Usual wake time (HH:MM)
    #[arg(long, default_value = "07:00")]
    wake: String,
    /// Usual sleep time (HH:MM)
    #[arg(long, default_value = "23:00")]
    sleep: String,
    /// Create the profile without generating a plan
    #[arg(long)]
    skip_plan: bool,
}

pub fn run(args: OnboardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    if store.get::<UserProfile>(USER_KEY).is_some() {
        return Err("a profile already exists; run `fastflow reset` to start over".into());
    }

    let data = OnboardingData {
        age: args.age,
        gender: args.gender.into(),
        weight: args.weight,
        goal: args.goal.into(),
        wake_time: args.wake,
        sleep_time: args.sleep,
    };
    let mut profile = UserProfile::from_onboarding(data, None)?;

    if !args.skip_plan {
        let cfg = Config::load_or_default();
        let client = CoachClient::from_config(&cfg.coach);
        let runtime = tokio::runtime::Runtime::new()?;
        let plan = runtime.block_on(client.generate_plan(&profile));
        profile.set_plan(plan);
    }

    store.set(USER_KEY, &profile);
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
