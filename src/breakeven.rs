//! Zero-crossings of an aggregate payoff curve.
//!
//! Payoff curves are piecewise-linear between strikes at expiration, so
//! linear interpolation between bracketing grid points recovers breakevens
//! exactly once the grid brackets every strike.

use crate::curve::PriceCurve;

/// Spot prices where the aggregate payoff crosses zero, ascending.
///
/// A curve with no sign change over its domain returns an empty vector —
/// valid for always-profitable or always-losing combinations, not an error.
/// A grid point sitting exactly at zero is reported once, and crossings
/// within one grid step of the previous one collapse to a single value so
/// numerical noise cannot double-count a breakeven.
///
/// # Examples
/// ```
/// use optstrat::breakeven::find_breakevens;
/// use optstrat::strategy::{compose, Leg};
/// use optstrat::types::{Direction, OptionType};
/// use optstrat::{curve, MarketState};
///
/// let market = MarketState::new(100.0, 0.30, 30.0 / 365.0, 0.05)?;
/// let legs = vec![
///     Leg::option(Direction::Long, OptionType::Call, 100.0, 1)?.with_entry_price(5.0)?,
/// ];
/// let grid = curve::default_grid(100.0)?;
/// let composition = compose(&legs, &market, &grid)?;
/// let breakevens = find_breakevens(&composition.curve);
/// assert!((breakevens[0] - 105.0).abs() < 1e-9);
/// # Ok::<(), optstrat::StrategyError>(())
/// ```
pub fn find_breakevens(curve: &PriceCurve) -> Vec<f64> {
    let points = curve.points();
    let mut crossings: Vec<f64> = Vec::new();

    fn push_collapsed(crossings: &mut Vec<f64>, x: f64, step: f64) {
        if let Some(&prev) = crossings.last() {
            if x - prev <= step {
                return;
            }
        }
        crossings.push(x);
    }

    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let step = b.spot - a.spot;
        if a.payoff == 0.0 {
            push_collapsed(&mut crossings, a.spot, step);
        } else if a.payoff * b.payoff < 0.0 {
            let t = a.payoff / (a.payoff - b.payoff);
            push_collapsed(&mut crossings, a.spot + t * step, step);
        }
    }

    // The window scan never inspects the final point on its own.
    if points.len() >= 2 {
        let last = points[points.len() - 1];
        let step = last.spot - points[points.len() - 2].spot;
        if last.payoff == 0.0 {
            push_collapsed(&mut crossings, last.spot, step);
        }
    }

    crossings
}
