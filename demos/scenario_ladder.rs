//! Run the standard scenario ladder over a long straddle.
//!
//! Demonstrates what-if analysis:
//!   1. Compose a straddle at fair value
//!   2. Advance a week of calendar time
//!   3. Re-value under the five standard spot moves
//!   4. Add a volatility crush on top
//!
//! Run with: `cargo run --example scenario_ladder`

use optstrat::scenario::{evaluate_spot_moves, Scenario, STANDARD_MOVES};
use optstrat::strategy::{StrategyKind, StrikeParams};
use optstrat::MarketState;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ---------------------------------------------------------------
    // 1. Market and strategy
    // ---------------------------------------------------------------

    let market = MarketState::from_days(100.0, 0.40, 30, 0.045)?;
    let legs = StrategyKind::LongStraddle.legs(StrikeParams::SingleStrike { strike: 100.0 })?;

    // ---------------------------------------------------------------
    // 2+3. One week later, across the spot ladder
    // ---------------------------------------------------------------

    println!("--- Long straddle, 7 days later ---\n");
    println!("{:>8} {:>10} {:>10}", "move", "spot", "P/L");
    for (spot, report) in evaluate_spot_moves(&legs, &market, 7.0, &STANDARD_MOVES)? {
        let pct = (spot / market.spot() - 1.0) * 100.0;
        println!("{pct:>7.0}% {spot:>10.1} {:>10.2}", report.pnl);
    }

    // ---------------------------------------------------------------
    // 4. Same ladder with implied vol crushed from 40% to 25%
    // ---------------------------------------------------------------

    println!("\n--- Same, with vol crushed to 25% ---\n");
    println!("{:>8} {:>10} {:>10}", "move", "spot", "P/L");
    for &m in &STANDARD_MOVES {
        let spot = market.spot() * (1.0 + m);
        let report = Scenario::new(7.0)?
            .with_spot(spot)?
            .with_vol(0.25)?
            .evaluate(&legs, &market)?;
        let pct = m * 100.0;
        println!("{pct:>7.0}% {spot:>10.1} {:>10.2}", report.pnl);
    }

    println!("\nLong premium hurts twice: decay plus the vol crush.");

    Ok(())
}
