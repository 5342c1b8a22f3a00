use super::types::*;
use serde::{Deserialize, Serialize};

/// Constants of the per-attempt cost curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTable {
    /// Divisor for stars below 10 (linear in star).
    pub low_divisor: f64,
    /// Divisors for stars 10-14, indexed by `star - 10`.
    pub mid_divisors: [f64; 5],
    /// Divisor for stars 15 and above.
    pub high_divisor: f64,
    /// Exponent on `star + 1` from star 10 on.
    pub star_exponent: f64,
    pub base_offset: f64,
    pub unit: f64,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            low_divisor: 2500.0,
            mid_divisors: [40000.0, 22000.0, 15000.0, 11000.0, 7500.0],
            high_divisor: 20000.0,
            star_exponent: 2.7,
            base_offset: 10.0,
            unit: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CostModel {
    table: CostTable,
}

impl CostModel {
    pub fn new(table: CostTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CostTable {
        &self.table
    }

    /// Undiscounted meso cost of one attempt, before safeguard.
    pub fn base_cost(&self, level: u32, item_strength: u32) -> f64 {
        let t = &self.table;
        let cubed = (item_strength as f64).powi(3);
        let star = (level + 1) as f64;
        let scaled = if level < 10 {
            cubed * star / t.low_divisor
        } else if level < 15 {
            cubed * star.powf(t.star_exponent) / t.mid_divisors[(level - 10) as usize]
        } else {
            cubed * star.powf(t.star_exponent) / t.high_divisor
        };
        t.unit * (scaled + t.base_offset).round()
    }

    /// Cost of one attempt at `level`. Rounding happens before `discount`
    /// is applied.
    pub fn cost(&self, level: u32, item_strength: u32, discount: f64, flags: &ModifierFlags) -> f64 {
        let mut cost = self.base_cost(level, item_strength) * discount;
        if safeguard_doubles(level, flags) {
            cost *= 2.0;
        }
        cost
    }
}

/// Safeguard doubles 15 and 16, except a guaranteed 15 which cannot fail.
pub fn safeguard_doubles(level: u32, flags: &ModifierFlags) -> bool {
    flags.safeguard
        && SAFEGUARD_STARS.contains(&level)
        && !(flags.guaranteed_checkpoints && level == 15)
}
