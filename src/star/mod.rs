//! Star enhancement cost model, outcome model and expectation engine.

pub mod cost;
pub mod engine;
pub mod outcome;
pub mod report;
pub mod request;
pub mod types;

pub use cost::*;
pub use engine::*;
pub use outcome::*;
pub use report::*;
pub use request::*;
pub use types::*;

use crate::error::Result;

/// Run a full calculation against the given odds.
pub fn calculate(
    request: StarforceRequest,
    odds: &OddsTable,
    options: EngineOptions,
) -> Result<StarforceReport> {
    let costs = CostModel::default();
    let outcomes = OutcomeModel::new(odds.clone());
    ExpectationEngine::new(&costs, &outcomes, request, options)?.run()
}

/// Expected meso cost to go from `start` to `target` with the default odds.
pub fn expected_cost(
    start: u32,
    target: u32,
    item_strength: u32,
    mvp_discount: f64,
    flags: ModifierFlags,
) -> Result<f64> {
    let request = StarforceRequest::new(item_strength, start, target, mvp_discount, flags)?;
    Ok(calculate(request, &OddsTable::default(), EngineOptions::default())?.expected_cost)
}
