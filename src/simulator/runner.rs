//! Monte Carlo runner using the same cost and outcome models as the
//! expectation engine.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::error::Result;
use crate::star::{
    attempt_discount, success_step, AttemptOutcome, CostModel, OddsTable, OutcomeModel,
    StarforceRequest, FLOOR_STAR,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// What one attempt did to the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptResult {
    Success,
    Stay,
    Decrease,
    Destroy,
}

/// Draw the result of one attempt from its outcome distribution.
pub fn roll_attempt<R: Rng>(outcome: &AttemptOutcome, rng: &mut R) -> AttemptResult {
    let roll = rng.gen::<f64>();
    if roll < outcome.success {
        AttemptResult::Success
    } else if roll < outcome.success + outcome.stay {
        AttemptResult::Stay
    } else if roll < outcome.success + outcome.stay + outcome.decrease {
        AttemptResult::Decrease
    } else if outcome.destroy > 0.0 {
        AttemptResult::Destroy
    } else {
        // Rounding left a sliver above the last nonzero bucket.
        AttemptResult::Stay
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, odds: &OddsTable) -> Result<SimReport> {
    config.request.validate()?;
    let costs = CostModel::default();
    let outcomes = OutcomeModel::new(odds.clone());
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(
            &config.request,
            &costs,
            &outcomes,
            config.max_attempts_per_run,
            &mut rng,
        )?;

        if config.verbosity >= 2 {
            tracing::info!(
                run = run_idx + 1,
                of = config.num_runs,
                cost = run.total_cost,
                attempts = run.attempts,
                destroys = run.destroys,
                "run finished"
            );
        }
        all_runs.push(run);
    }

    let report = SimReport::from_runs(all_runs);
    if config.verbosity >= 1 {
        tracing::info!(
            runs = report.num_runs,
            mean_cost = report.mean_cost,
            timed_out = report.runs_timed_out,
            "simulation complete"
        );
    }
    Ok(report)
}

/// Climb one item from the start star to the target.
pub fn simulate_single_run<R: Rng>(
    request: &StarforceRequest,
    costs: &CostModel,
    outcomes: &OutcomeModel,
    max_attempts: u64,
    rng: &mut R,
) -> Result<RunStats> {
    let flags = request.flags;
    let mut level = request.start;
    let mut stats = RunStats::default();

    while level < request.target {
        if stats.attempts >= max_attempts {
            return Ok(stats);
        }
        let outcome = outcomes.outcome(level, &flags)?;
        let discount = attempt_discount(level, request.mvp_discount, &flags);
        stats.total_cost += costs.cost(level, request.item_strength, discount, &flags);
        stats.attempts += 1;

        match roll_attempt(&outcome, rng) {
            AttemptResult::Success => level += success_step(level, &flags),
            AttemptResult::Stay => {}
            AttemptResult::Decrease => level = level.saturating_sub(1),
            AttemptResult::Destroy => {
                level = FLOOR_STAR;
                stats.destroys += 1;
            }
        }
    }

    stats.reached_target = true;
    Ok(stats)
}
