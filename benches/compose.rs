use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use optstrat::breakeven::find_breakevens;
use optstrat::curve::spot_grid;
use optstrat::pricing::price_and_greeks;
use optstrat::strategy::{compose, compose_at, CurveKind, Leg, StrategyKind, StrikeParams};
use optstrat::types::OptionType;
use optstrat::MarketState;

/// 30-day market at spot 100, 30% vol.
fn standard_market() -> MarketState {
    MarketState::from_days(100.0, 0.30, 30, 0.045).expect("benchmark market should be valid")
}

/// Iron condor legs at the canonical 85/95/105/115 strikes.
fn condor_legs() -> Vec<Leg> {
    StrategyKind::IronCondor
        .legs(StrikeParams::FourStrike {
            k1: 85.0,
            k2: 95.0,
            k3: 105.0,
            k4: 115.0,
        })
        .expect("benchmark strikes should be valid")
}

fn pricing_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("pricing");
    let market = standard_market();

    group.bench_function("price_and_greeks", |b| {
        b.iter(|| {
            price_and_greeks(black_box(&market), black_box(105.0), OptionType::Call).unwrap()
        });
    });

    group.finish();
}

fn composition_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("composition");
    let market = standard_market();
    let legs = condor_legs();
    let grid = spot_grid(60.0, 140.0, 200).expect("benchmark grid should be valid");

    // Expiration payoff: 4 quotes + an intrinsic sweep over 200 points
    group.bench_function("condor_expiry_200pts", |b| {
        b.iter(|| compose(black_box(&legs), black_box(&market), black_box(&grid)).unwrap());
    });

    // Mark-to-market: full Black-Scholes per leg per grid point
    group.bench_function("condor_mtm_200pts", |b| {
        b.iter(|| {
            compose_at(
                black_box(&legs),
                black_box(&market),
                black_box(&grid),
                CurveKind::MarkToMarket,
            )
            .unwrap()
        });
    });

    let composition = compose(&legs, &market, &grid).expect("benchmark compose should succeed");
    group.bench_function("find_breakevens_200pts", |b| {
        b.iter(|| find_breakevens(black_box(&composition.curve)));
    });

    group.finish();
}

criterion_group!(benches, pricing_benchmarks, composition_benchmarks);
criterion_main!(benches);
