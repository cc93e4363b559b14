#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use meditrack_alerts::AlertEngine;
use meditrack_core::models::Medicine;
use meditrack_core::MediTrackConfig;
use meditrack_observability::init_tracing;
use meditrack_scheduler::Scheduler;
use meditrack_storage::StorageEngine;

#[derive(Parser)]
#[command(name = "meditrack")]
#[command(about = "Pharmacy demand forecasting and inventory alerts")]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Database file, overriding `storage.db_path`.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synthesize alerts and replace every unresolved one.
    Generate,
    /// Print the demand prediction report and raise prediction alerts.
    Predict,
    /// Run the expiry sweep once.
    SweepExpiry,
    /// Load medicines from a JSON file (an array, or an object with `medicines`).
    Seed { path: PathBuf },
    /// Most recent unresolved alerts.
    Alerts {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Alert counts by status, severity and type.
    Summary,
    /// Run the periodic jobs until Ctrl-C.
    Run,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    List(Vec<Medicine>),
    Catalog { medicines: Vec<Medicine> },
}

impl SeedFile {
    fn into_medicines(self) -> Vec<Medicine> {
        match self {
            SeedFile::List(m) | SeedFile::Catalog { medicines: m } => m,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => MediTrackConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MediTrackConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.storage.db_path = db.display().to_string();
    }
    init_tracing(&config.observability);

    let store = Arc::new(
        StorageEngine::open_with_config(&config.storage)
            .with_context(|| format!("opening database {}", config.storage.db_path))?,
    );
    let engine = AlertEngine::new(Arc::clone(&store), &config);

    match cli.command {
        Command::Generate => {
            let report = engine.generate_alerts().await;
            print_json(&report)?;
            return Ok(if report.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
        Command::Predict => print_json(&engine.predict_demand().await?)?,
        Command::SweepExpiry => print_json(&engine.sweep_expiring().await?)?,
        Command::Seed { path } => {
            let medicines = read_seed(&path)?;
            let written = store.seed(&medicines).await?;
            println!("seeded {written} medicines");
        }
        Command::Alerts { limit } => print_json(&engine.recent_alerts(limit).await?)?,
        Command::Summary => print_json(&engine.alert_summary().await?)?,
        Command::Run => {
            let handle = Scheduler::start(engine, &config.scheduler)?;
            if handle.jobs().is_empty() {
                anyhow::bail!("scheduler is disabled in the configuration");
            }
            tokio::signal::ctrl_c()
                .await
                .context("waiting for Ctrl-C")?;
            handle.shutdown().await;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn read_seed(path: &Path) -> anyhow::Result<Vec<Medicine>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let parsed: SeedFile = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(parsed.into_medicines())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
