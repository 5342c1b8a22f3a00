//! Result of one expected-cost calculation.

use super::engine::{EngineOptions, Regime};
use super::request::StarforceRequest;
use super::types::*;
use serde::Serialize;

/// One priced transition, in walk order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub level: u32,
    pub regime: Regime,
    pub outcome: AttemptOutcome,
    /// Cost of a single attempt at `level`, discounts and safeguard applied.
    pub cost: f64,
    /// Expected spend to leave `level` upward.
    pub expected_cost: f64,
    pub stars_gained: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StarforceReport {
    pub request: StarforceRequest,
    pub options: EngineOptions,
    pub expected_cost: f64,
    pub expected_destroys: f64,
    pub no_destroy_probability: f64,
    /// Per-transition expectations, indexed by star reached.
    pub per_transition: [f64; STAR_SLOTS],
    pub steps: Vec<StepRecord>,
}

impl StarforceReport {
    /// Steps whose target star is inside the requested range.
    pub fn requested_steps(&self) -> impl Iterator<Item = &StepRecord> {
        let start = self.request.start;
        self.steps.iter().filter(move |s| s.level >= start)
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();
        let req = &self.request;

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str(&format!(
            "  STARFORCE  ★{} → ★{}   (item level {})\n",
            req.start, req.target, req.item_strength
        ));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        let labels = req.flags.labels();
        report.push_str(&format!(
            "  MVP Discount:  {:.0}%\n",
            req.mvp_discount * 100.0
        ));
        report.push_str(&format!(
            "  Options:       {}\n\n",
            if labels.is_empty() {
                "none".to_string()
            } else {
                labels.join(", ")
            }
        ));

        report.push_str("── BREAKDOWN ────────────────────────────────────────────────────\n");
        report.push_str("  Star   Success   Attempt Cost       Expected Cost\n");
        report.push_str("  ────   ───────   ────────────   ─────────────────\n");
        for step in self.requested_steps() {
            let reached = step.level + step.stars_gained;
            report.push_str(&format!(
                "  {:>2}→{:<2} {:>6.1}%   {:>12}   {:>17}\n",
                step.level,
                reached,
                step.outcome.success * 100.0,
                group_thousands(step.cost),
                group_thousands(step.expected_cost),
            ));
        }
        report.push('\n');

        report.push_str("── RESULT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  The expected cost is: {}\n",
            group_thousands(self.expected_cost)
        ));
        report.push_str(&format!(
            "  Expected number of booms: {:.4}\n",
            self.expected_destroys
        ));
        report.push_str(&format!(
            "  P(no Boom): {:.4}\n",
            self.no_destroy_probability
        ));
        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Round to a whole number and group digits by thousands.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
