//! Simulation report generation.

use crate::star::group_thousands;
use serde::Serialize;

/// What happened during one simulated climb.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub total_cost: f64,
    pub attempts: u64,
    pub destroys: u32,
    pub reached_target: bool,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,

    // Cost distribution over completed runs
    pub mean_cost: f64,
    pub min_cost: f64,
    pub median_cost: f64,
    pub p90_cost: f64,
    pub max_cost: f64,

    pub avg_attempts: f64,
    pub avg_destroys: f64,
    /// Fraction of completed runs without a single destroy
    pub no_destroy_rate: f64,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let completed: Vec<&RunStats> = runs.iter().filter(|r| r.reached_target).collect();
        let runs_completed = completed.len() as u32;
        let runs_timed_out = num_runs - runs_completed;
        let denom = runs_completed.max(1) as f64;

        let mut costs: Vec<f64> = completed.iter().map(|r| r.total_cost).collect();
        costs.sort_by(|a, b| a.total_cmp(b));

        let mean_cost = costs.iter().sum::<f64>() / denom;
        let avg_attempts = completed.iter().map(|r| r.attempts as f64).sum::<f64>() / denom;
        let avg_destroys = completed.iter().map(|r| r.destroys as f64).sum::<f64>() / denom;
        let no_destroy_rate =
            completed.iter().filter(|r| r.destroys == 0).count() as f64 / denom;

        Self {
            num_runs,
            runs_completed,
            runs_timed_out,
            mean_cost,
            min_cost: costs.first().copied().unwrap_or(0.0),
            median_cost: percentile(&costs, 0.5),
            p90_cost: percentile(&costs, 0.9),
            max_cost: costs.last().copied().unwrap_or(0.0),
            avg_attempts,
            avg_destroys,
            no_destroy_rate,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} completed, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.runs_timed_out
        ));

        report.push_str("── COST ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Mean:    {}\n", group_thousands(self.mean_cost)));
        report.push_str(&format!("  Min:     {}\n", group_thousands(self.min_cost)));
        report.push_str(&format!("  Median:  {}\n", group_thousands(self.median_cost)));
        report.push_str(&format!("  P90:     {}\n", group_thousands(self.p90_cost)));
        report.push_str(&format!("  Max:     {}\n\n", group_thousands(self.max_cost)));

        report.push_str("── ATTEMPTS ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Attempts:  {:.1}\n", self.avg_attempts));
        report.push_str(&format!("  Avg Booms:     {:.4}\n", self.avg_destroys));
        report.push_str(&format!(
            "  No Boom Rate:  {:.1}%\n",
            self.no_destroy_rate * 100.0
        ));

        if self.runs_timed_out > 0 {
            report.push_str(&format!(
                "  ⚠️  {} runs hit the attempt cap - results are biased low\n",
                self.runs_timed_out
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Nearest-rank percentile of an ascending slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = ((q * sorted.len() as f64).ceil() as usize).clamp(1, sorted.len());
    sorted[rank - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(total_cost: f64, destroys: u32, reached_target: bool) -> RunStats {
        RunStats {
            total_cost,
            attempts: 10,
            destroys,
            reached_target,
        }
    }

    #[test]
    fn test_report_generation() {
        let runs = vec![
            run(100.0, 0, true),
            run(300.0, 1, true),
            run(200.0, 0, true),
            run(50.0, 0, false),
        ];

        let report = SimReport::from_runs(runs);
        assert_eq!(report.num_runs, 4);
        assert_eq!(report.runs_completed, 3);
        assert_eq!(report.runs_timed_out, 1);
        assert!((report.mean_cost - 200.0).abs() < 1e-9);
        assert_eq!(report.min_cost, 100.0);
        assert_eq!(report.median_cost, 200.0);
        assert_eq!(report.max_cost, 300.0);
        assert!((report.no_destroy_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!(report.to_text().contains("1 runs hit the attempt cap"));
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.mean_cost, 0.0);
        assert_eq!(report.p90_cost, 0.0);
    }
}
