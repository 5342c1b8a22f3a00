//! Starforce - expected enhancement cost calculator
//!
//! Exposes the cost model, outcome model and expectation engine, plus a
//! Monte Carlo simulator used to cross-check the analytical results.

pub mod cli;
pub mod error;
pub mod simulator;
pub mod star;

pub use error::{Result, StarforceError};
