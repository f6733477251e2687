//! Prediction CLI.
//!
//! Reads an integrated race record JSON, runs the prediction pipeline and
//! writes the prediction record JSON next to a human-readable summary on
//! stdout. Fetching and persisting the records is the job of the surrounding
//! tooling; this binary only drives the core.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kyotei_core::{predict, IntegratedRace, PredictConfig, Scenario, SimulationConfig};

#[derive(Parser)]
#[command(name = "kyotei")]
#[command(about = "Monte Carlo prediction for one six-lane boat race", long_about = None)]
struct Cli {
    /// Integrated race record JSON
    #[arg(long)]
    input: PathBuf,

    /// Where to write the prediction record JSON (stdout summary only when
    /// omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Monte Carlo trial count
    #[arg(long)]
    trials: Option<u32>,

    /// Base seed for the trial PRNG
    #[arg(long)]
    seed: Option<u64>,

    /// Exact ticket count to synthesize
    #[arg(long)]
    target: Option<usize>,

    /// Optional scenario list JSON; replaces the simulated distribution as
    /// the ticket source
    #[arg(long)]
    scenarios: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading race record {}", cli.input.display()))?;
    let race = IntegratedRace::from_json(&input).context("parsing race record")?;

    let scenarios: Option<Vec<Scenario>> = match &cli.scenarios {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading scenarios {}", path.display()))?;
            Some(serde_json::from_str(&json).context("parsing scenarios")?)
        }
        None => None,
    };

    let mut simulation = SimulationConfig::default();
    if let Some(trials) = cli.trials {
        simulation.trials = trials;
    }
    let cfg = PredictConfig {
        seed: cli.seed,
        simulation,
        target_tickets: cli.target,
        scenarios,
        linked_pairs: None,
    };

    let record = predict(&race, &cfg)?;
    info!(
        race = %record.meta.race_id(),
        tickets = record.tickets.triples.len(),
        "prediction complete"
    );

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(path, json)
            .with_context(|| format!("writing prediction {}", path.display()))?;
    }

    print!("{}", record.render_summary());
    Ok(())
}
