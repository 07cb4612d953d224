//src/main.rs
use std::{fs, path::PathBuf, process};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use elden_planner::{
    PlannerConfig,
    error::{PlannerError, handle_error},
    save::BuildRecord,
    summarize,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "planner")]
#[command(about = "Inspect and validate saved Elden Ring builds")]
struct Cli {
    /// Path to planner.toml (defaults to $PLANNER_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List saved builds
    List,
    /// Show derived stats and validation for a saved build
    Show { index: usize },
    /// Validate a build record JSON file
    Check { record: PathBuf },
    /// Remove a saved build
    Remove { index: usize },
}

fn friendly(error: PlannerError) -> anyhow::Error {
    anyhow!(handle_error(&error))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PlannerConfig::load(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = config.store();
    match cli.command {
        Command::List => {
            let builds = store.list().map_err(friendly)?;
            if builds.is_empty() {
                println!("No saved builds in {}", store.path().display());
            }
            for (i, build) in builds.iter().enumerate() {
                let ty = build.build_type.to_string();
                let saved = build
                    .timestamp
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "Unknown".to_string());
                println!(
                    "#{i} {}{} | Level {} | {}kg | {saved}",
                    build.build_name,
                    if ty.is_empty() { String::new() } else { format!(" [{ty}]") },
                    build.level(),
                    build.total_weight,
                );
            }
        }
        Command::Show { index } => {
            let record = store.get(index).map_err(friendly)?;
            let catalogs = config.catalogs().map_err(friendly)?;
            print!("{}", summarize(&record, &catalogs));
        }
        Command::Check { record } => {
            let text = fs::read_to_string(&record)
                .with_context(|| format!("Failed to read {}", record.display()))?;
            let record: BuildRecord =
                serde_json::from_str(&text).map_err(|e| friendly(e.into()))?;
            let catalogs = config.catalogs().map_err(friendly)?;
            let summary = summarize(&record, &catalogs);
            print!("{summary}");
            if !summary.is_valid() {
                process::exit(1);
            }
        }
        Command::Remove { index } => {
            let removed = store.remove(index).map_err(friendly)?;
            println!("Removed #{index} {}", removed.build_name);
        }
    }

    Ok(())
}
