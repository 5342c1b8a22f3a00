//! Simulation configuration.

use crate::star::{ModifierFlags, StarforceRequest};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated climbs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Attempts per climb before it is counted as timed out
    pub max_attempts_per_run: u64,

    /// Item, star range, discount and options of every climb
    pub request: StarforceRequest,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 10_000,
            seed: None,
            max_attempts_per_run: 1_000_000,
            request: StarforceRequest {
                item_strength: 150,
                start: 0,
                target: 17,
                mvp_discount: 0.0,
                flags: ModifierFlags::none(),
            },
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded run for checking a single request
    pub fn quick(request: StarforceRequest, seed: u64) -> Self {
        Self {
            num_runs: 1_000,
            seed: Some(seed),
            request,
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Large run for comparing against the analytical expectation
    pub fn convergence(request: StarforceRequest) -> Self {
        Self {
            num_runs: 100_000,
            request,
            ..Default::default()
        }
    }
}
