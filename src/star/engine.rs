//! Expected-cost recurrence over a range of stars.
//!
//! `E[n]` is the expected spend of the transition `n - 1 -> n`. From 15 on,
//! a destroy drops the item to [`FLOOR_STAR`] so its price is the whole
//! floor segment `E[13..=cursor]`, and a decrease re-pays one or two of
//! the preceding transitions. The engine carries the two previous
//! transitions in a [`LookbackState`] for that.

use super::cost::CostModel;
use super::outcome::OutcomeModel;
use super::report::{StarforceReport, StepRecord};
use super::request::StarforceRequest;
use super::types::*;
use crate::error::{Result, StarforceError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineOptions {
    /// Start the walk at `min(start, FLOOR_STAR)` so the floor segment is
    /// priced even when starting above it. Only `E[start+1..=target]` is
    /// summed either way.
    pub prime_floor: bool,
}

/// Previous-transition values needed from star 17 on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LookbackState {
    pub last_decrease: f64,
    pub last_destroy: f64,
    pub two_cost_ago: f64,
    pub last_cost: f64,
}

impl LookbackState {
    fn push(&mut self, outcome: &AttemptOutcome, cost: f64) {
        *self = LookbackState {
            last_decrease: outcome.decrease,
            last_destroy: outcome.destroy,
            two_cost_ago: self.last_cost,
            last_cost: cost,
        };
    }
}

/// Which form of the recurrence a star uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Regime {
    /// Below 15: only stay can happen on failure.
    Geometric,
    /// 15 and 20: destroy only.
    SegmentHead,
    /// 16 and 21: decrease re-pays the transition just made.
    SecondStep,
    /// Everything else from 17: decrease can chain back two transitions.
    Compound,
}

pub fn regime(level: u32) -> Regime {
    match level {
        0..=14 => Regime::Geometric,
        15 | 20 => Regime::SegmentHead,
        16 | 21 => Regime::SecondStep,
        _ => Regime::Compound,
    }
}

/// Stateful walk from the start star to the target, one transition per
/// [`step`](ExpectationEngine::step).
pub struct ExpectationEngine<'a> {
    cost_model: &'a CostModel,
    outcome_model: &'a OutcomeModel,
    request: StarforceRequest,
    options: EngineOptions,
    cursor: u32,
    expected: [f64; STAR_SLOTS],
    no_destroy: [f64; STAR_SLOTS],
    expected_destroys: [f64; STAR_SLOTS],
    lookback: LookbackState,
    steps: Vec<StepRecord>,
}

impl<'a> ExpectationEngine<'a> {
    pub fn new(
        cost_model: &'a CostModel,
        outcome_model: &'a OutcomeModel,
        request: StarforceRequest,
        options: EngineOptions,
    ) -> Result<Self> {
        request.validate()?;
        let cursor = if options.prime_floor {
            request.start.min(FLOOR_STAR)
        } else {
            request.start
        };
        Ok(Self {
            cost_model,
            outcome_model,
            request,
            options,
            cursor,
            expected: [0.0; STAR_SLOTS],
            no_destroy: [1.0; STAR_SLOTS],
            expected_destroys: [0.0; STAR_SLOTS],
            lookback: LookbackState::default(),
            steps: Vec::new(),
        })
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.request.target
    }

    pub fn lookback(&self) -> &LookbackState {
        &self.lookback
    }

    pub fn expected_costs(&self) -> &[f64; STAR_SLOTS] {
        &self.expected
    }

    /// Price the transition out of the current star and advance the
    /// cursor. Returns `None` once the target is reached.
    pub fn step(&mut self) -> Result<Option<StepRecord>> {
        if self.is_done() {
            return Ok(None);
        }

        let level = self.cursor;
        let flags = self.request.flags;
        let discount = attempt_discount(level, self.request.mvp_discount, &flags);
        let outcome = self.outcome_model.outcome(level, &flags)?;
        let cost = self
            .cost_model
            .cost(level, self.request.item_strength, discount, &flags);

        if outcome.success <= 0.0 {
            return Err(StarforceError::DegenerateProbability { level });
        }

        let regime = regime(level);
        let expected = self.transition_cost(level, regime, &outcome, cost);
        let next = level as usize + 1;
        self.expected[next] = expected;
        self.record_destroy_stats(level, regime, &outcome);
        self.lookback.push(&outcome, cost);

        let step = success_step(level, &flags);
        self.cursor += step;

        tracing::debug!(
            level,
            ?regime,
            cost,
            success = outcome.success,
            expected,
            "priced transition"
        );

        let record = StepRecord {
            level,
            regime,
            outcome,
            cost,
            expected_cost: expected,
            stars_gained: step,
        };
        self.steps.push(record.clone());
        Ok(Some(record))
    }

    fn transition_cost(
        &self,
        level: u32,
        regime: Regime,
        outcome: &AttemptOutcome,
        cost: f64,
    ) -> f64 {
        let AttemptOutcome {
            success,
            decrease,
            destroy,
            ..
        } = *outcome;
        let segment = floor_segment_sum(&self.expected, level);
        let previous = self.expected[level as usize];
        let lb = &self.lookback;

        match regime {
            Regime::Geometric => cost / success,
            Regime::SegmentHead => (cost + destroy * segment) / success,
            Regime::SecondStep => (cost + decrease * previous + destroy * segment) / success,
            Regime::Compound => {
                (cost
                    + decrease * lb.last_cost
                    + decrease * lb.last_decrease * (lb.two_cost_ago + previous)
                    + (decrease * lb.last_destroy + destroy) * segment)
                    / success
            }
        }
    }

    fn record_destroy_stats(&mut self, level: u32, regime: Regime, outcome: &AttemptOutcome) {
        let AttemptOutcome {
            success: s,
            decrease,
            destroy,
            ..
        } = *outcome;
        let idx = level as usize;
        let booms_so_far = destroys_segment_sum(&self.expected_destroys, level);
        let prev_clean = self.no_destroy[idx];
        let prev_booms = self.expected_destroys[idx];
        let lb = &self.lookback;

        let (clean, booms) = match regime {
            Regime::Geometric => return,
            Regime::SegmentHead => (s / (s + destroy), destroy * (1.0 + booms_so_far) / s),
            Regime::SecondStep => (
                s / (s + destroy + decrease * (1.0 - prev_clean)),
                (destroy * (1.0 + booms_so_far) + decrease * prev_booms) / s,
            ),
            Regime::Compound => (
                s / (s
                    + destroy
                    + decrease * lb.last_decrease * (1.0 - prev_clean)
                    + decrease * lb.last_destroy),
                (decrease * lb.last_decrease * prev_booms
                    + (booms_so_far + 1.0) * (decrease * lb.last_destroy + destroy))
                    / s,
            ),
        };
        self.no_destroy[idx + 1] = clean;
        self.expected_destroys[idx + 1] = booms;
    }

    /// Drive the walk to the target and aggregate the result.
    pub fn run(mut self) -> Result<StarforceReport> {
        while self.step()?.is_some() {}

        let range = self.request.start as usize + 1..=self.request.target as usize;
        let expected_cost: f64 = self.expected[range.clone()].iter().sum();
        let expected_destroys: f64 = self.expected_destroys[range.clone()].iter().sum();
        let no_destroy_probability: f64 = self.no_destroy[range].iter().product();

        tracing::debug!(
            start = self.request.start,
            target = self.request.target,
            expected_cost,
            "expectation complete"
        );

        Ok(StarforceReport {
            request: self.request,
            options: self.options,
            expected_cost,
            expected_destroys,
            no_destroy_probability,
            per_transition: self.expected,
            steps: self.steps,
        })
    }
}

/// `E[13..=level]`: the cost of climbing back from the floor to `level`.
fn floor_segment_sum(expected: &[f64; STAR_SLOTS], level: u32) -> f64 {
    let end = level as usize;
    if end < FLOOR_SEGMENT_START {
        return 0.0;
    }
    expected[FLOOR_SEGMENT_START..=end].iter().sum()
}

/// Destroys already expected on the way from 15 up to `level`.
fn destroys_segment_sum(destroys: &[f64; STAR_SLOTS], level: u32) -> f64 {
    let start = SEGMENT_HEADS[0] as usize + 1;
    let end = level as usize;
    if end < start {
        return 0.0;
    }
    destroys[start..=end].iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    fn request(start: u32, target: u32, strength: u32) -> StarforceRequest {
        StarforceRequest::new(strength, start, target, 0.0, ModifierFlags::none()).unwrap()
    }

    #[test]
    fn test_regimes() {
        assert_eq!(regime(0), Regime::Geometric);
        assert_eq!(regime(14), Regime::Geometric);
        assert_eq!(regime(15), Regime::SegmentHead);
        assert_eq!(regime(16), Regime::SecondStep);
        assert_eq!(regime(17), Regime::Compound);
        assert_eq!(regime(19), Regime::Compound);
        assert_eq!(regime(20), Regime::SegmentHead);
        assert_eq!(regime(21), Regime::SecondStep);
        assert_eq!(regime(24), Regime::Compound);
    }

    #[test]
    fn test_step_by_step_through_floor_segment() {
        let costs = CostModel::default();
        let outcomes = OutcomeModel::default();
        let mut engine =
            ExpectationEngine::new(&costs, &outcomes, request(14, 18, 200), EngineOptions::default())
                .unwrap();

        let s14 = engine.step().unwrap().unwrap();
        assert_eq!(s14.regime, Regime::Geometric);
        let e15 = s14.cost / 0.3;
        assert!(approx(engine.expected_costs()[15], e15));
        assert_eq!(engine.lookback().last_cost, s14.cost);

        let s15 = engine.step().unwrap().unwrap();
        let destroy15 = 0.7 * 0.03;
        let e16 = (s15.cost + destroy15 * e15) / 0.3;
        assert!(approx(engine.expected_costs()[16], e16));
        assert_eq!(engine.lookback().two_cost_ago, s14.cost);

        let s16 = engine.step().unwrap().unwrap();
        let (dec16, des16) = (0.7 * 0.97, 0.7 * 0.03);
        let e17 = (s16.cost + dec16 * e16 + des16 * (e15 + e16)) / 0.3;
        assert!(approx(engine.expected_costs()[17], e17));

        let s17 = engine.step().unwrap().unwrap();
        let (dec17, des17) = (0.7 * 0.97, 0.7 * 0.03);
        let e18 = (s17.cost
            + dec17 * s16.cost
            + dec17 * dec16 * (s15.cost + e17)
            + (dec17 * des16 + des17) * (e15 + e16 + e17))
            / 0.3;
        assert!(approx(engine.expected_costs()[18], e18));

        assert!(engine.is_done());
        assert!(engine.step().unwrap().is_none());
    }

    #[test]
    fn test_double_attempt_skips_levels() {
        let costs = CostModel::default();
        let outcomes = OutcomeModel::default();
        let flags = ModifierFlags {
            double_attempt: true,
            ..Default::default()
        };
        let req = StarforceRequest::new(150, 0, 6, 0.0, flags).unwrap();
        let report = ExpectationEngine::new(&costs, &outcomes, req, EngineOptions::default())
            .unwrap()
            .run()
            .unwrap();
        let priced: Vec<u32> = report.steps.iter().map(|s| s.level).collect();
        assert_eq!(priced, vec![0, 2, 4]);
        assert_eq!(report.per_transition[2], 0.0);
        assert_eq!(report.per_transition[4], 0.0);
        assert_eq!(report.per_transition[6], 0.0);
        assert!(report.per_transition[5] > 0.0);
    }

    #[test]
    fn test_zero_success_is_degenerate() {
        let mut odds = OddsTable::default();
        odds.success[7] = 0.0;
        let costs = CostModel::default();
        let outcomes = OutcomeModel::new(odds);
        let err = ExpectationEngine::new(&costs, &outcomes, request(5, 9, 150), EngineOptions::default())
            .unwrap()
            .run()
            .unwrap_err();
        assert!(matches!(err, StarforceError::DegenerateProbability { level: 7 }));
    }
}
