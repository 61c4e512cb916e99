use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "habitrack", version, about = "Habit and reminder tracker")]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Activity management
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Record a day as done, skipped, or unmarked
    Mark {
        #[command(subcommand)]
        action: commands::mark::MarkAction,
    },
    /// Current and longest streak for an activity
    Streak(commands::progress::StreakArgs),
    /// Calendar strip ending today (or --as-of)
    Week(commands::progress::WeekArgs),
    /// Arm today's reminders
    Remind(commands::remind::RemindArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Activity { action } => commands::activity::run(action),
        Commands::Mark { action } => commands::mark::run(action),
        Commands::Streak(args) => commands::progress::run_streak(args),
        Commands::Week(args) => commands::progress::run_week(args),
        Commands::Remind(args) => commands::remind::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
