//! Integration tests for the optstrat pipeline.
//!
//! Exercises the full path from market data through template expansion,
//! composition, breakeven detection, and scenario analysis, plus the
//! serde and concurrency guarantees the crate documents.

use std::sync::Arc;
use std::thread;

use approx::assert_abs_diff_eq;

use optstrat::breakeven::find_breakevens;
use optstrat::curve::{default_grid, spot_grid};
use optstrat::pricing::price_and_greeks;
use optstrat::scenario::{evaluate_spot_moves, Scenario, STANDARD_MOVES};
use optstrat::strategy::{compose, compose_at, CurveKind, Leg, StrategyKind, StrikeParams};
use optstrat::types::{Direction, OptionType};
use optstrat::{Composition, MarketState, StrategyError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 30-day market at spot 100, 30% vol, 5% rate.
fn standard_market() -> MarketState {
    MarketState::from_days(100.0, 0.30, 30, 0.05).unwrap()
}

/// Straddle legs with pinned premiums, the classic 94/106 textbook setup.
fn pinned_straddle() -> Vec<Leg> {
    vec![
        Leg::option(Direction::Long, OptionType::Call, 100.0, 1)
            .unwrap()
            .with_entry_price(3.0)
            .unwrap(),
        Leg::option(Direction::Long, OptionType::Put, 100.0, 1)
            .unwrap()
            .with_entry_price(3.0)
            .unwrap(),
    ]
}

// ---------------------------------------------------------------------------
// Template → composition → breakeven pipeline
// ---------------------------------------------------------------------------

#[test]
fn long_call_breakeven_is_strike_plus_premium() {
    let market = standard_market();
    let legs = vec![Leg::option(Direction::Long, OptionType::Call, 100.0, 1)
        .unwrap()
        .with_entry_price(5.0)
        .unwrap()];
    let grid = default_grid(market.spot()).unwrap();
    let composition = compose(&legs, &market, &grid).unwrap();
    let breakevens = find_breakevens(&composition.curve);
    assert_eq!(breakevens.len(), 1);
    assert_abs_diff_eq!(breakevens[0], 105.0, epsilon = 1e-9);
}

#[test]
fn straddle_breakevens_bracket_the_strike() {
    let market = standard_market();
    let grid = default_grid(market.spot()).unwrap();
    let composition = compose(&pinned_straddle(), &market, &grid).unwrap();
    assert_abs_diff_eq!(composition.net_cost.0, 6.0, epsilon = 1e-12);
    let breakevens = find_breakevens(&composition.curve);
    assert_eq!(breakevens.len(), 2);
    assert_abs_diff_eq!(breakevens[0], 94.0, epsilon = 1e-9);
    assert_abs_diff_eq!(breakevens[1], 106.0, epsilon = 1e-9);
}

#[test]
fn iron_condor_pipeline() {
    let market = standard_market();
    let legs = StrategyKind::IronCondor
        .legs(StrikeParams::FourStrike {
            k1: 85.0,
            k2: 95.0,
            k3: 105.0,
            k4: 115.0,
        })
        .unwrap();
    let grid = default_grid(market.spot()).unwrap();
    let composition = compose(&legs, &market, &grid).unwrap();

    // Selling the inner spread collects more than the wings cost.
    assert!(composition.net_cost.is_credit());
    let credit = composition.net_cost.abs();

    // Flat profit tunnel between the short strikes equals the credit.
    assert_abs_diff_eq!(
        composition.curve.payoff_at(100.0).unwrap(),
        credit,
        epsilon = 1e-9
    );

    // Max loss beyond either wing is the wing width minus the credit.
    assert_abs_diff_eq!(
        composition.curve.payoff_at(80.0).unwrap(),
        credit - 10.0,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        composition.curve.payoff_at(120.0).unwrap(),
        credit - 10.0,
        epsilon = 1e-9
    );

    // Two breakevens: inner strikes shifted by the credit.
    let breakevens = find_breakevens(&composition.curve);
    assert_eq!(breakevens.len(), 2);
    assert_abs_diff_eq!(breakevens[0], 95.0 - credit, epsilon = 1e-9);
    assert_abs_diff_eq!(breakevens[1], 105.0 + credit, epsilon = 1e-9);
}

#[test]
fn iron_butterfly_is_condor_with_pinched_body() {
    let market = standard_market();
    let fly = StrategyKind::IronButterfly
        .legs(StrikeParams::FourStrike {
            k1: 90.0,
            k2: 100.0,
            k3: 100.0,
            k4: 110.0,
        })
        .unwrap();
    // Step of 0.5 puts a node exactly on the body strike.
    let grid = spot_grid(60.0, 140.0, 161).unwrap();
    let composition = compose(&fly, &market, &grid).unwrap();
    assert!(composition.net_cost.is_credit());
    // Peak profit sits at the body and equals the credit.
    assert_abs_diff_eq!(
        composition.curve.payoff_at(100.0).unwrap(),
        composition.net_cost.abs(),
        epsilon = 1e-9
    );
    let breakevens = find_breakevens(&composition.curve);
    assert_eq!(breakevens.len(), 2);
}

#[test]
fn bull_put_spread_credit_and_max_loss() {
    let market = standard_market();
    let legs = vec![
        Leg::option(Direction::Short, OptionType::Put, 100.0, 1)
            .unwrap()
            .with_entry_price(4.0)
            .unwrap(),
        Leg::option(Direction::Long, OptionType::Put, 95.0, 1)
            .unwrap()
            .with_entry_price(2.0)
            .unwrap(),
    ];
    let grid = default_grid(market.spot()).unwrap();
    let composition = compose(&legs, &market, &grid).unwrap();
    assert_abs_diff_eq!(composition.net_cost.0, -2.0, epsilon = 1e-12);
    let max_loss = composition
        .curve
        .iter()
        .map(|p| p.payoff)
        .fold(f64::INFINITY, f64::min);
    assert_abs_diff_eq!(max_loss, -3.0, epsilon = 1e-9);
}

#[test]
fn box_spread_has_flat_curve_and_no_breakevens() {
    // Long 95/105 call spread + long 105/95 put spread with premiums chosen
    // so the flat payoff sits strictly above zero everywhere.
    let market = standard_market();
    let legs = vec![
        Leg::option(Direction::Long, OptionType::Call, 95.0, 1)
            .unwrap()
            .with_entry_price(6.0)
            .unwrap(),
        Leg::option(Direction::Short, OptionType::Call, 105.0, 1)
            .unwrap()
            .with_entry_price(2.0)
            .unwrap(),
        Leg::option(Direction::Long, OptionType::Put, 105.0, 1)
            .unwrap()
            .with_entry_price(5.0)
            .unwrap(),
        Leg::option(Direction::Short, OptionType::Put, 95.0, 1)
            .unwrap()
            .with_entry_price(1.5)
            .unwrap(),
    ];
    let grid = default_grid(market.spot()).unwrap();
    let composition = compose(&legs, &market, &grid).unwrap();
    // Payoff is (105 − 95) − net premium at every spot.
    let expected = 10.0 - composition.net_cost.0;
    for p in composition.curve.iter() {
        assert_abs_diff_eq!(p.payoff, expected, epsilon = 1e-9);
    }
    assert!(find_breakevens(&composition.curve).is_empty());
}

// ---------------------------------------------------------------------------
// Cross-component consistency
// ---------------------------------------------------------------------------

#[test]
fn net_cost_offsets_the_raw_intrinsic_profile() {
    let market = standard_market();
    let legs = StrategyKind::LongStrangle
        .legs(StrikeParams::StrangleShaped {
            put_strike: 90.0,
            call_strike: 110.0,
        })
        .unwrap();
    let grid = spot_grid(60.0, 140.0, 161).unwrap();
    let composition = compose(&legs, &market, &grid).unwrap();
    for p in composition.curve.iter() {
        let raw = OptionType::Put.intrinsic(p.spot, 90.0) + OptionType::Call.intrinsic(p.spot, 110.0);
        assert_abs_diff_eq!(p.payoff + composition.net_cost.0, raw, epsilon = 1e-10);
    }
}

#[test]
fn scenario_at_expiry_matches_expiration_curve() {
    let market = standard_market();
    let legs = pinned_straddle();
    // Step of 0.5 puts nodes on the strike and on every probed spot.
    let grid = spot_grid(60.0, 140.0, 161).unwrap();
    let composition = compose(&legs, &market, &grid).unwrap();

    // Scenario run to expiry at a shocked spot must land on the payoff curve.
    for &target in &[85.0, 100.0, 118.0] {
        let report = Scenario::new(30.0)
            .unwrap()
            .with_spot(target)
            .unwrap()
            .evaluate(&legs, &market)
            .unwrap();
        let on_curve = composition.curve.payoff_at(target).unwrap();
        assert_abs_diff_eq!(report.pnl, on_curve, epsilon = 1e-9);
    }
}

#[test]
fn scenario_ladder_on_a_condor() {
    let market = standard_market();
    let legs = StrategyKind::IronCondor
        .legs(StrikeParams::FourStrike {
            k1: 85.0,
            k2: 95.0,
            k3: 105.0,
            k4: 115.0,
        })
        .unwrap();
    let ladder = evaluate_spot_moves(&legs, &market, 30.0, &STANDARD_MOVES).unwrap();
    assert_eq!(ladder.len(), 5);
    // Held to expiry: unchanged spot keeps the full credit, the tails lose.
    let unchanged = &ladder[2].1;
    assert!(unchanged.pnl > 0.0);
    assert!(ladder[0].1.pnl < 0.0);
    assert!(ladder[4].1.pnl < 0.0);
}

#[test]
fn mark_to_market_mode_differs_from_expiration_payoff() {
    let market = standard_market();
    let legs = vec![Leg::option(Direction::Long, OptionType::Call, 100.0, 1).unwrap()];
    let grid = spot_grid(60.0, 140.0, 201).unwrap();
    let expiry = compose_at(&legs, &market, &grid, CurveKind::Expiry).unwrap();
    let mtm = compose_at(&legs, &market, &grid, CurveKind::MarkToMarket).unwrap();
    assert_ne!(expiry.curve, mtm.curve);
    // Same entry premium either way.
    assert_eq!(expiry.net_cost, mtm.net_cost);
    // Before expiry the marked curve carries time value above intrinsic.
    let atm_gap = mtm.curve.payoff_at(100.0).unwrap() - expiry.curve.payoff_at(100.0).unwrap();
    assert!(atm_gap > 0.0);
}

// ---------------------------------------------------------------------------
// Error propagation
// ---------------------------------------------------------------------------

#[test]
fn one_bad_leg_fails_the_whole_composition() {
    let market = standard_market();
    let grid = default_grid(market.spot()).unwrap();
    // A strike outside the grid poisons the entire strategy, atomically.
    let legs = vec![
        Leg::option(Direction::Long, OptionType::Call, 100.0, 1).unwrap(),
        Leg::option(Direction::Short, OptionType::Call, 500.0, 1).unwrap(),
    ];
    assert!(matches!(
        compose(&legs, &market, &grid),
        Err(StrategyError::GridCoverage { .. })
    ));
}

#[test]
fn template_ordering_failure_names_the_template() {
    let err = StrategyKind::BullCallSpread
        .legs(StrikeParams::TwoStrike {
            lower: 110.0,
            upper: 100.0,
        })
        .unwrap_err();
    match err {
        StrategyError::UnorderedStrikes { template, .. } => {
            assert_eq!(template, "Bull Call Spread")
        }
        other => panic!("expected UnorderedStrikes, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Serde and concurrency guarantees
// ---------------------------------------------------------------------------

#[test]
fn composition_survives_a_serde_roundtrip() {
    let market = standard_market();
    let grid = spot_grid(60.0, 140.0, 41).unwrap();
    let composition = compose(&pinned_straddle(), &market, &grid).unwrap();
    let json = serde_json::to_string(&composition).unwrap();
    let back: Composition = serde_json::from_str(&json).unwrap();
    assert_eq!(composition, back);
}

#[test]
fn shared_legs_compose_identically_across_threads() {
    let market = standard_market();
    let legs = Arc::new(pinned_straddle());
    let grid = Arc::new(default_grid(market.spot()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let legs = Arc::clone(&legs);
            let grid = Arc::clone(&grid);
            thread::spawn(move || compose(&legs, &market, &grid).unwrap())
        })
        .collect();

    let reference = compose(&legs, &market, &grid).unwrap();
    for handle in handles {
        let result = handle.join().unwrap();
        assert_eq!(result, reference);
    }
}

#[test]
fn greeks_aggregate_matches_single_leg_quotes() {
    let market = standard_market();
    let legs = StrategyKind::BullCallSpread
        .legs(StrikeParams::TwoStrike {
            lower: 100.0,
            upper: 110.0,
        })
        .unwrap();
    let grid = default_grid(market.spot()).unwrap();
    let composition = compose(&legs, &market, &grid).unwrap();
    let low = price_and_greeks(&market, 100.0, OptionType::Call).unwrap();
    let high = price_and_greeks(&market, 110.0, OptionType::Call).unwrap();
    assert_abs_diff_eq!(
        composition.greeks.delta,
        low.greeks.delta - high.greeks.delta,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        composition.greeks.theta,
        low.greeks.theta - high.greeks.theta,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(composition.net_cost.0, low.price - high.price, epsilon = 1e-12);
}
