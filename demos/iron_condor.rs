//! Build an iron condor and inspect its payoff profile.
//!
//! Demonstrates the core workflow:
//!   1. Define the market state
//!   2. Expand a strategy template into legs
//!   3. Compose the legs into a payoff curve, greeks, and net cost
//!   4. Locate the breakevens
//!
//! Run with: `cargo run --example iron_condor`

use optstrat::breakeven::find_breakevens;
use optstrat::curve::default_grid;
use optstrat::strategy::{compose, StrategyKind, StrikeParams};
use optstrat::MarketState;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ---------------------------------------------------------------
    // 1. Market: spot 100, 30% vol, 30 days to expiry, 4.5% rate
    // ---------------------------------------------------------------

    let market = MarketState::from_days(100.0, 0.30, 30, 0.045)?;

    // ---------------------------------------------------------------
    // 2. Strategy: 85/95/105/115 iron condor
    // ---------------------------------------------------------------

    let kind = StrategyKind::IronCondor;
    let legs = kind.legs(StrikeParams::FourStrike {
        k1: 85.0,
        k2: 95.0,
        k3: 105.0,
        k4: 115.0,
    })?;

    let info = kind.info();
    println!("{} — {}", info.name, info.description);
    println!("Construction: {}\n", info.construction);

    // ---------------------------------------------------------------
    // 3. Compose
    // ---------------------------------------------------------------

    let grid = default_grid(market.spot())?;
    let condor = compose(&legs, &market, &grid)?;

    if condor.net_cost.is_credit() {
        println!("Net credit received: {:.2}", condor.net_cost.abs());
    } else {
        println!("Net debit paid: {:.2}", condor.net_cost.abs());
    }
    println!("Delta: {:>8.4}", condor.greeks.delta);
    println!("Gamma: {:>8.4}", condor.greeks.gamma);
    println!("Theta: {:>8.4} per day", condor.greeks.theta);
    println!("Vega:  {:>8.4} per vol point\n", condor.greeks.vega);

    // ---------------------------------------------------------------
    // 4. Payoff profile and breakevens
    // ---------------------------------------------------------------

    println!("--- Payoff at expiry ---\n");
    for spot in [80.0, 90.0, 95.0, 100.0, 105.0, 110.0, 120.0] {
        println!("  S = {spot:>6.1}   P/L = {:>7.2}", condor.curve.payoff_at(spot)?);
    }

    let breakevens = find_breakevens(&condor.curve);
    println!("\nBreakevens: {breakevens:.2?}");
    println!("({})", info.breakeven);

    Ok(())
}
