//! Monte Carlo starforce simulator.
//!
//! Replays individual attempts with a seeded RNG to check the analytical
//! expectation:
//! - Mean and spread of the total cost
//! - Attempts per climb
//! - How often a climb gets through without a destroy

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{roll_attempt, run_simulation, simulate_single_run, AttemptResult};
