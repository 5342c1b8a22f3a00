use super::types::*;
use crate::error::{Result, StarforceError};

/// Outcome model bound to one odds table.
#[derive(Debug, Clone, Default)]
pub struct OutcomeModel {
    odds: OddsTable,
}

impl OutcomeModel {
    pub fn new(odds: OddsTable) -> Self {
        Self { odds }
    }

    pub fn odds(&self) -> &OddsTable {
        &self.odds
    }

    pub fn outcome(&self, level: u32, flags: &ModifierFlags) -> Result<AttemptOutcome> {
        outcome(level, &self.odds, flags)
    }
}

/// Outcome distribution of one attempt at `level`.
///
/// Star catching multiplies the base success rate and is never clamped;
/// a boosted rate above 1 is reported as [`StarforceError::ProbabilityOverflow`].
pub fn outcome(level: u32, odds: &OddsTable, flags: &ModifierFlags) -> Result<AttemptOutcome> {
    let idx = level as usize;
    if flags.guaranteed_checkpoints && CHECKPOINT_STARS.contains(&level) {
        return Ok(AttemptOutcome::CERTAIN);
    }

    let mut success = odds.success[idx];
    if flags.star_catching {
        success *= STAR_CATCH_MULTIPLIER;
    }
    if success > 1.0 {
        return Err(StarforceError::ProbabilityOverflow { level, success });
    }

    let fail = 1.0 - success;
    let mut stay = fail * odds.stay[idx];
    let mut decrease = fail * odds.decrease[idx];
    let mut destroy = fail * odds.destroy[idx];

    if flags.safeguard && SAFEGUARD_STARS.contains(&level) {
        if stay != 0.0 {
            stay += destroy;
        } else {
            decrease += destroy;
        }
        destroy = 0.0;
    }

    Ok(AttemptOutcome {
        success,
        stay,
        decrease,
        destroy,
    })
}
