//! Outcome model tests: failure split, star catching, safeguard, checkpoints.

use starforce::star::{
    outcome, AttemptOutcome, ModifierFlags, OddsTable, OutcomeModel, MAX_STAR,
};
use starforce::StarforceError;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

// =========================================================================
// Distribution invariants
// =========================================================================

#[test]
fn test_distribution_sums_to_one_everywhere() {
    let odds = OddsTable::default();
    for flags in ModifierFlags::all_combinations() {
        for level in 0..MAX_STAR {
            let o = outcome(level, &odds, &flags).unwrap();
            assert!(
                (o.total() - 1.0).abs() < 1e-9,
                "star {level} {flags:?} sums to {}",
                o.total()
            );
            for p in [o.success, o.stay, o.decrease, o.destroy] {
                assert!(p >= 0.0, "negative probability at star {level} {flags:?}");
            }
        }
    }
}

#[test]
fn test_low_stars_only_stay_on_failure() {
    let odds = OddsTable::default();
    for level in 0..15 {
        let o = outcome(level, &odds, &ModifierFlags::none()).unwrap();
        assert_eq!(o.decrease, 0.0);
        assert_eq!(o.destroy, 0.0);
        assert!(close(o.stay, 1.0 - o.success));
    }
}

#[test]
fn test_model_wraps_table() {
    let model = OutcomeModel::default();
    assert_eq!(model.odds(), &OddsTable::default());
    assert_eq!(
        model.outcome(22, &ModifierFlags::none()).unwrap(),
        outcome(22, &OddsTable::default(), &ModifierFlags::none()).unwrap()
    );
}

// =========================================================================
// Star catching
// =========================================================================

#[test]
fn test_star_catching_boosts_relative() {
    let flags = ModifierFlags {
        star_catching: true,
        ..Default::default()
    };
    let o = outcome(0, &OddsTable::default(), &flags).unwrap();
    assert!(close(o.success, 0.95 * 1.05));
    assert!(close(o.stay, 1.0 - 0.95 * 1.05));

    let o = outcome(22, &OddsTable::default(), &flags).unwrap();
    assert!(close(o.success, 0.03 * 1.05));
}

#[test]
fn test_star_catching_overflow_rejected() {
    let mut odds = OddsTable::default();
    odds.success[0] = 0.97;
    let flags = ModifierFlags {
        star_catching: true,
        ..Default::default()
    };
    match outcome(0, &odds, &flags) {
        Err(StarforceError::ProbabilityOverflow { level, success }) => {
            assert_eq!(level, 0);
            assert!(success > 1.0);
        }
        other => panic!("expected overflow, got {other:?}"),
    }
    // Without the boost the same table is fine.
    assert!(outcome(0, &odds, &ModifierFlags::none()).is_ok());
}

// =========================================================================
// Safeguard
// =========================================================================

#[test]
fn test_safeguard_at_16_moves_destroy_into_decrease() {
    let flags = ModifierFlags {
        safeguard: true,
        ..Default::default()
    };
    let o = outcome(16, &OddsTable::default(), &flags).unwrap();
    assert_eq!(o.destroy, 0.0);
    assert_eq!(o.stay, 0.0);
    assert!(close(o.decrease, 0.7));
}

#[test]
fn test_safeguard_does_not_protect_17() {
    let flags = ModifierFlags {
        safeguard: true,
        ..Default::default()
    };
    let o = outcome(17, &OddsTable::default(), &flags).unwrap();
    assert!(close(o.destroy, 0.7 * 0.03));
}

// =========================================================================
// Checkpoint guarantee
// =========================================================================

#[test]
fn test_checkpoints_are_certain_under_any_flags() {
    let odds = OddsTable::default();
    for flags in ModifierFlags::all_combinations().filter(|f| f.guaranteed_checkpoints) {
        for level in [5, 10, 15] {
            assert_eq!(outcome(level, &odds, &flags).unwrap(), AttemptOutcome::CERTAIN);
        }
    }
}

#[test]
fn test_guarantee_leaves_other_stars_alone() {
    let flags = ModifierFlags {
        guaranteed_checkpoints: true,
        ..Default::default()
    };
    let odds = OddsTable::default();
    for level in [4, 6, 11, 16, 20] {
        assert_eq!(
            outcome(level, &odds, &flags).unwrap(),
            outcome(level, &odds, &ModifierFlags::none()).unwrap()
        );
    }
}

// =========================================================================
// Odds table loading
// =========================================================================

#[test]
fn test_odds_table_json_roundtrip_validates() {
    let json = serde_json::to_string(&OddsTable::default()).unwrap();
    let table = OddsTable::from_json(&json).unwrap();
    assert_eq!(table, OddsTable::default());
}

#[test]
fn test_odds_table_rejects_bad_split() {
    let mut table = OddsTable::default();
    table.stay[3] = 0.5;
    let json = serde_json::to_string(&table).unwrap();
    assert!(matches!(
        OddsTable::from_json(&json),
        Err(StarforceError::InvalidOdds(_))
    ));
}

#[test]
fn test_odds_table_rejects_out_of_range() {
    let mut table = OddsTable::default();
    table.success[8] = 1.2;
    assert!(matches!(table.validate(), Err(StarforceError::InvalidOdds(_))));
}

#[test]
fn test_odds_table_rejects_wrong_length() {
    let json = r#"{"success":[0.5],"stay":[1],"decrease":[0],"destroy":[0]}"#;
    assert!(matches!(
        OddsTable::from_json(json),
        Err(StarforceError::Json(_))
    ));
}
