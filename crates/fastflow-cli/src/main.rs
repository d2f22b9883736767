use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fastflow", version, about = "FastFlow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create your profile and generate a fasting plan
    Onboard(commands::onboard::OnboardArgs),
    /// Fasting timer control
    Fast {
        #[command(subcommand)]
        action: commands::fast::FastAction,
    },
    /// Mood journal
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// AI coach: plans and advice
    Coach {
        #[command(subcommand)]
        action: commands::coach::CoachAction,
    },
    /// Progress statistics
    Stats,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Delete the profile, sessions, and journal
    Reset {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Onboard(args) => commands::onboard::run(args),
        Commands::Fast { action } => commands::fast::run(action),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Coach { action } => commands::coach::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reset { yes } => commands::reset::run(yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
