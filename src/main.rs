use rbsim::{bench_tick, run_2d, run_headless, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "arena.yaml")]
    file_name: String,

    /// Run without a window
    #[arg(long)]
    headless: bool,

    /// Ticks to run in headless mode
    #[arg(long, default_value_t = 600)]
    ticks: usize,

    /// Fixed time step in headless mode, seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Time the tick pipeline instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

// The windowed viewer installs its own subscriber through Bevy's LogPlugin
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        init_tracing();
        bench_tick();
        return Ok(());
    }

    if args.headless {
        init_tracing();
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.headless {
        let summary = run_headless(&mut scenario.world, args.ticks, args.dt)?;
        info!("simulated {:.3} s, {} collisions resolved", summary.simulated_time, summary.collisions);
    } else {
        run_2d(scenario.world);
    }

    Ok(())
}
