mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "radar-cli")]
#[command(about = "DemandRadar scoring command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score a collected run and print its six scores
    Score {
        /// JSON or YAML file with the run's records
        #[arg(long)]
        input: PathBuf,

        /// Reference time for recency (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<String>,

        /// Input is already-shaped run statistics instead of raw records
        #[arg(long)]
        shaped: bool,
    },
    /// Compute trend velocity for a series of observations
    Trend {
        #[arg(long)]
        input: PathBuf,
    },
    /// Rank product ideas by build-to-profit score
    RankIdeas {
        #[arg(long)]
        input: PathBuf,
    },
    /// Rank UGC assets by their source-specific score
    RankUgc {
        #[arg(long)]
        input: PathBuf,

        /// Reference time for age-based factors (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Parse first so --help and usage errors never depend on the environment.
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("radar-cli: pass --help for available commands");
        return Ok(());
    };

    let config = radar_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "configuration loaded");

    let output = match command {
        Commands::Score { input, now, shaped } => {
            commands::run_score(&input, now.as_deref(), shaped, &config.scoring)?
        }
        Commands::Trend { input } => commands::run_trend(&input)?,
        Commands::RankIdeas { input } => commands::run_rank_ideas(&input, &config.scoring)?,
        Commands::RankUgc { input, now } => commands::run_rank_ugc(&input, now.as_deref())?,
    };

    println!("{output}");
    Ok(())
}
