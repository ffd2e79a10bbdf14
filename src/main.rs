//! grid-dispatch-sim entry point: CLI wiring and config-driven driver construction.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use grid_dispatch_sim::config::ScenarioConfig;
use grid_dispatch_sim::error::Result;
use grid_dispatch_sim::io::export::{export_csv, export_json};
use grid_dispatch_sim::sim::kpi::RunKpis;
use grid_dispatch_sim::sim::types::TickRecord;
use grid_dispatch_sim::sim::{Command, SimulationDriver, run_realtime};

/// Renewable grid simulation: classical vs quantum-inspired dispatch.
#[derive(Parser, Debug)]
#[command(name = "grid-dispatch-sim", version, about)]
struct Cli {
    /// Load scenario from a TOML config file
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, high_renewables, storage_heavy, evening_peak)
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of ticks to simulate
    #[arg(long)]
    ticks: Option<usize>,

    /// Override the simulation speed multiplier
    #[arg(long)]
    speed: Option<u32>,

    /// Pace ticks by the configured wall-clock interval (Ctrl-C stops)
    #[arg(long)]
    realtime: bool,

    /// Export per-tick records to CSV
    #[arg(long, value_name = "FILE")]
    telemetry_out: Option<PathBuf>,

    /// Export KPIs and per-tick records to JSON
    #[arg(long, value_name = "FILE")]
    json_out: Option<PathBuf>,

    /// Suppress per-tick output
    #[arg(long, short)]
    quiet: bool,
}

/// Resolves the scenario: `--scenario` takes priority, then `--preset`,
/// then the baseline default, with CLI overrides applied last.
fn load_scenario(cli: &Cli) -> ScenarioConfig {
    let loaded = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::baseline())
    };
    let mut scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(seed) = cli.seed {
        scenario.run.seed = seed;
    }
    if let Some(ticks) = cli.ticks {
        scenario.run.ticks = ticks;
    }
    if let Some(speed) = cli.speed {
        scenario.simulation.speed = speed;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    scenario
}

async fn simulate(driver: &mut SimulationDriver, ticks: usize, realtime: bool, quiet: bool) -> Result<Vec<TickRecord>> {
    if !realtime {
        let records = driver.run(ticks).await?;
        if !quiet {
            for r in &records {
                println!("{r}");
            }
        }
        return Ok(records);
    }

    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping");
            tx.send(Command::Shutdown).await.ok();
        }
    });
    run_realtime(driver, ticks, rx, |r| {
        if !quiet {
            println!("{r}");
        }
    })
    .await
}

fn report(records: &[TickRecord], kpis: &RunKpis) {
    println!("\n{kpis}");

    if let Some(last) = records.last() {
        let comparison = last.comparison();
        let annual = comparison.annualized();
        println!("\n{comparison}");
        println!(
            "Annualized:            ${:.0} saved, {:.0} MWh less curtailment, {:.0} t less CO2",
            annual.cost_savings, annual.curtailment_reduction_mwh, annual.emissions_reduction_t
        );
        println!("Quantum backend:       {:?}", last.backend_hint());
    }
}

fn write_outputs(cli: &Cli, records: &[TickRecord], kpis: &RunKpis) {
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(records, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {}", path.display());
    }
    if let Some(ref path) = cli.json_out {
        if let Err(e) = export_json(kpis, records, Path::new(path)) {
            eprintln!("error: failed to write JSON: {e}");
            process::exit(1);
        }
        eprintln!("Report written to {}", path.display());
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let scenario = load_scenario(&cli);

    let mut driver = SimulationDriver::new(&scenario).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    let records = simulate(&mut driver, scenario.run.ticks, cli.realtime, cli.quiet)
        .await
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        });
    if records.len() < scenario.run.ticks {
        warn!(committed = records.len(), requested = scenario.run.ticks, "run ended early");
    }

    let kpis = RunKpis::from_records(
        &records,
        driver.hours_per_tick(),
        driver.config().storage_capacity_mwh,
    );
    report(&records, &kpis);
    write_outputs(&cli, &records, &kpis);
}
