//! # powderline
//!
//! Command-line runner for the snowfall alert system: wires configuration,
//! weather providers, the decision engine, and Slack delivery.

mod run;
mod settings;

use clap::{Parser, Subcommand};

pub type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "powderline")]
#[command(about = "Snowfall evaluation and alerting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one evaluation cycle over the enabled resorts
    Check {
        /// Evaluate and log, but do not deliver notifications
        #[arg(long)]
        dry_run: bool,

        /// Print the full cycle report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run evaluation cycles on an interval until interrupted
    Watch {
        /// Hours between cycles
        #[arg(long, env = "CHECK_FREQUENCY", default_value_t = 6)]
        interval_hours: u64,

        /// Evaluate and log, but do not deliver notifications
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect the resort registry
    Resorts {
        #[command(subcommand)]
        command: ResortCommands,
    },

    /// Send a synthetic alert to verify Slack wiring
    TestAlert {
        /// Resort name to use in the message
        #[arg(long, default_value = "Park City Mountain")]
        resort: String,

        /// Snowfall amount in inches
        #[arg(long, default_value_t = 8.5)]
        inches: f64,
    },
}

#[derive(Subcommand)]
enum ResortCommands {
    /// List configured resorts
    List,
    /// Validate the registry
    Validate,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(message) = dispatch(cli) {
        eprintln!("error: {}", message);
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn dispatch(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Check { dry_run, json } => run::check(dry_run, json),
        Commands::Watch {
            interval_hours,
            dry_run,
        } => run::watch(interval_hours, dry_run),
        Commands::Resorts { command } => match command {
            ResortCommands::List => list_resorts(),
            ResortCommands::Validate => validate_resorts(),
        },
        Commands::TestAlert { resort, inches } => run::test_alert(&resort, inches),
    }
}

fn list_resorts() -> CliResult<()> {
    let all = resorts::builtin();
    let selected = resorts::enabled(&all);
    for resort in &selected {
        println!(
            "{:<22} {:>6} ft  {:<26} {}",
            resort.name, resort.elevation_ft, resort.region, resort.coordinates
        );
    }
    println!("{} of {} resorts enabled", selected.len(), all.len());
    Ok(())
}

fn validate_resorts() -> CliResult<()> {
    let failures = resorts::validate_all(&resorts::builtin());
    if failures.is_empty() {
        println!("registry OK");
        return Ok(());
    }
    for (name, problems) in &failures {
        for problem in problems {
            println!("{}: {}", name, problem);
        }
    }
    Err(format!("{} resorts failed validation", failures.len()))
}
