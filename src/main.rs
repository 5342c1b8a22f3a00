//! Starforce expected-cost calculator.
//!
//! Usage:
//!   starforce -l 160 -s 0 -t 22 --mvp gold --safeguard

use clap::Parser;
use starforce::cli::{init_tracing, RequestArgs};
use starforce::star::{calculate, EngineOptions};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "starforce", version, about = "Expected cost of starforcing an item")]
struct Cli {
    #[command(flatten)]
    request: RequestArgs,

    /// Price the 13..start floor segment when starting above star 12
    #[arg(long)]
    prime_floor: bool,

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
    let options = EngineOptions {
        prime_floor: cli.prime_floor,
    };
    let report = calculate(request, &odds, options)?;

    if cli.json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
