//! Monte Carlo starforce simulator CLI.
//!
//! Replays attempts to check the analytical expected cost.
//!
//! Usage:
//!   cargo run --bin simulate -- -l 150 -s 0 -t 17 [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate -- -l 200 -s 12 -t 17 -n 50000
//!   cargo run --bin simulate -- -l 150 -s 0 -t 10 --seed 42 --double

use clap::Parser;
use starforce::cli::{init_tracing, RequestArgs};
use starforce::simulator::{run_simulation, SimConfig};
use starforce::star::{calculate, group_thousands, EngineOptions};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "simulate", about = "Monte Carlo starforce simulator")]
struct Cli {
    #[command(flatten)]
    request: RequestArgs,

    /// Number of simulated climbs
    #[arg(long, short = 'n', default_value_t = 10_000)]
    runs: u32,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Attempts per climb before giving up
    #[arg(long, default_value_t = 1_000_000)]
    max_attempts: u64,

    /// Per-run output
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> starforce::Result<()> {
    let request = cli.request.to_request()?;
    let odds = cli.request.load_odds()?;
    let config = SimConfig {
        num_runs: cli.runs,
        seed: cli.seed,
        max_attempts_per_run: cli.max_attempts,
        request: request.clone(),
        verbosity: if cli.verbose { 2 } else { 1 },
    };

    let report = run_simulation(&config, &odds)?;
    if cli.json {
        println!("{}", report.to_json());
        return Ok(());
    }

    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Item Level:     {}", request.item_strength);
    println!("  Stars:          {} → {}", request.start, request.target);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("{}", report.to_text());

    let analytical = calculate(request, &odds, EngineOptions { prime_floor: true })?;
    println!(
        "Analytical expectation: {} ({:+.2}% vs simulated mean)",
        group_thousands(analytical.expected_cost),
        relative_gap(report.mean_cost, analytical.expected_cost) * 100.0
    );
    Ok(())
}

fn relative_gap(simulated: f64, analytical: f64) -> f64 {
    if simulated == 0.0 {
        0.0
    } else {
        (analytical - simulated) / simulated
    }
}
