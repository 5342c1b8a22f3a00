use crate::error::{Result, StarforceError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_STAR: u32 = 25;
/// One entry per star, 0 through `MAX_STAR`.
pub const STAR_SLOTS: usize = MAX_STAR as usize + 1;

/// Star that a destroy sends progress back to. Re-climbing from here
/// means re-paying transitions 13, 14, ... up to the current star.
pub const FLOOR_STAR: u32 = 12;
/// First per-transition entry of the floor segment (12 -> 13).
pub const FLOOR_SEGMENT_START: usize = FLOOR_STAR as usize + 1;

/// First star of each segment with destroy risk.
pub const SEGMENT_HEADS: [u32; 2] = [15, 20];
pub const CHECKPOINT_STARS: [u32; 3] = [5, 10, 15];
pub const SAFEGUARD_STARS: [u32; 2] = [15, 16];
/// Double-attempt events apply while the cursor is at or below this star.
pub const DOUBLE_ATTEMPT_MAX_STAR: u32 = 10;
/// MVP discounts apply while the cursor is at or below this star.
pub const MVP_MAX_STAR: u32 = 15;

pub const STAR_CATCH_MULTIPLIER: f64 = 1.05;
pub const THIRTY_OFF_MULTIPLIER: f64 = 0.7;

const PROBABILITY_TOLERANCE: f64 = 1e-9;

const BASE_SUCCESS: [f64; STAR_SLOTS] = [
    0.95, 0.90, 0.85, 0.85, 0.80, // 0-4
    0.75, 0.70, 0.65, 0.60, 0.55, // 5-9
    0.50, 0.45, 0.40, 0.35, 0.30, // 10-14
    0.30, 0.30, 0.30, 0.30, 0.30, // 15-19
    0.30, 0.30, 0.03, 0.02, 0.01, // 20-24
    0.0,  // 25: terminal
];

const BASE_STAY: [f64; STAR_SLOTS] = [
    1.0, 1.0, 1.0, 1.0, 1.0, //
    1.0, 1.0, 1.0, 1.0, 1.0, //
    1.0, 1.0, 1.0, 1.0, 1.0, //
    0.97, 0.0, 0.0, 0.0, 0.0, //
    0.90, 0.0, 0.0, 0.0, 0.0, //
    1.0,
];

const BASE_DECREASE: [f64; STAR_SLOTS] = [
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.97, 0.97, 0.96, 0.96, //
    0.0, 0.90, 0.80, 0.70, 0.60, //
    0.0,
];

const BASE_DESTROY: [f64; STAR_SLOTS] = [
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0, //
    0.03, 0.03, 0.03, 0.04, 0.04, //
    0.10, 0.10, 0.20, 0.30, 0.40, //
    0.0,
];

/// Base odds per star. `stay`, `decrease` and `destroy` are fractions of
/// the failure mass, not absolute probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsTable {
    pub success: [f64; STAR_SLOTS],
    pub stay: [f64; STAR_SLOTS],
    pub decrease: [f64; STAR_SLOTS],
    pub destroy: [f64; STAR_SLOTS],
}

impl Default for OddsTable {
    fn default() -> Self {
        Self {
            success: BASE_SUCCESS,
            stay: BASE_STAY,
            decrease: BASE_DECREASE,
            destroy: BASE_DESTROY,
        }
    }
}

impl OddsTable {
    /// Check every entry is a probability and that the failure split of
    /// each attemptable star sums to 1.
    pub fn validate(&self) -> Result<()> {
        let columns = [
            ("success", &self.success),
            ("stay", &self.stay),
            ("decrease", &self.decrease),
            ("destroy", &self.destroy),
        ];
        for (name, column) in columns {
            if let Some((level, value)) = column
                .iter()
                .enumerate()
                .find(|(_, p)| !(0.0..=1.0).contains(*p))
            {
                return Err(StarforceError::InvalidOdds(format!(
                    "{name}[{level}] = {value} is not a probability"
                )));
            }
        }

        for level in 0..MAX_STAR as usize {
            let split = self.stay[level] + self.decrease[level] + self.destroy[level];
            if (split - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(StarforceError::InvalidOdds(format!(
                    "failure split at star {level} sums to {split}, expected 1"
                )));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let table: OddsTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// The five independent attempt options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierFlags {
    /// Attempts at 5, 10 and 15 always succeed.
    pub guaranteed_checkpoints: bool,
    /// Each success at or below 10 grants two stars.
    pub double_attempt: bool,
    /// 30% off every attempt, stacking multiplicatively with MVP.
    pub thirty_percent_off: bool,
    /// Success rate boosted by 5% relative.
    pub star_catching: bool,
    /// No destroy at 15 and 16, at double cost.
    pub safeguard: bool,
}

impl ModifierFlags {
    pub fn none() -> Self {
        Self::default()
    }

    /// All 32 flag combinations, for exhaustive checks.
    pub fn all_combinations() -> impl Iterator<Item = ModifierFlags> {
        (0u8..32).map(|bits| ModifierFlags {
            guaranteed_checkpoints: bits & 1 != 0,
            double_attempt: bits & 2 != 0,
            thirty_percent_off: bits & 4 != 0,
            star_catching: bits & 8 != 0,
            safeguard: bits & 16 != 0,
        })
    }

    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.guaranteed_checkpoints {
            labels.push("5/10/15");
        }
        if self.double_attempt {
            labels.push("+2 stars (up to 10)");
        }
        if self.thirty_percent_off {
            labels.push("30% off");
        }
        if self.star_catching {
            labels.push("Star Catching");
        }
        if self.safeguard {
            labels.push("Safeguard");
        }
        labels
    }
}

/// Outcome distribution of one attempt. All four are absolute probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttemptOutcome {
    pub success: f64,
    pub stay: f64,
    pub decrease: f64,
    pub destroy: f64,
}

impl AttemptOutcome {
    pub const CERTAIN: AttemptOutcome = AttemptOutcome {
        success: 1.0,
        stay: 0.0,
        decrease: 0.0,
        destroy: 0.0,
    };

    pub fn total(&self) -> f64 {
        self.success + self.stay + self.decrease + self.destroy
    }
}

/// MVP membership tiers and the discount each grants up to star 15.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MvpTier {
    #[default]
    None,
    Silver,
    Gold,
    Diamond,
}

impl MvpTier {
    pub fn discount(&self) -> f64 {
        match self {
            MvpTier::None => 0.0,
            MvpTier::Silver => 0.03,
            MvpTier::Gold => 0.05,
            MvpTier::Diamond => 0.10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MvpTier::None => "None",
            MvpTier::Silver => "MVP silver (3% off 1 to 16)",
            MvpTier::Gold => "MVP gold (5% off 1 to 16)",
            MvpTier::Diamond => "MVP Diamond (10% off 1 to 16)",
        }
    }
}

/// Per-attempt discount multiplier at `level`.
pub fn attempt_discount(level: u32, mvp_discount: f64, flags: &ModifierFlags) -> f64 {
    let mvp = if level <= MVP_MAX_STAR { mvp_discount } else { 0.0 };
    if flags.thirty_percent_off {
        THIRTY_OFF_MULTIPLIER * (1.0 - mvp)
    } else {
        1.0 - mvp
    }
}

/// Stars gained by one success at `level`.
pub fn success_step(level: u32, flags: &ModifierFlags) -> u32 {
    if flags.double_attempt && level <= DOUBLE_ATTEMPT_MAX_STAR {
        2
    } else {
        1
    }
}
