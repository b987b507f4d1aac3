//! Aggregation of legs into a payoff curve, net entry cost, and portfolio
//! greeks.
//!
//! Each option leg is priced once per distinct `(strike, call/put)` pair at
//! the current spot (memoized within the call), then swept across the grid. The
//! default curve is the expiration payoff — intrinsic value as if time has
//! fully elapsed. [`CurveKind::MarkToMarket`] instead re-values every leg by
//! Black-Scholes at the original expiry across the grid, the mode scenario
//! analysis consumes.
//!
//! Sign convention: a leg contributes `direction × quantity ×
//! (value(x) − entry_premium)`. The premium term appears exactly once per
//! leg; shorting flips the whole difference, which is what turns a paid
//! premium into a received one.

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::curve::{CurvePoint, PriceCurve};
use crate::error::{self, StrategyError};
use crate::market::MarketState;
use crate::pricing::{price_and_greeks, Greeks, QuoteCache};
use crate::strategy::leg::{Instrument, Leg};
use crate::types::NetCost;
use crate::validate::validate_grid;

/// Which valuation the payoff curve samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveKind {
    /// Intrinsic value at expiration. The default payoff chart.
    #[default]
    Expiry,
    /// Full Black-Scholes re-valuation at the original expiry, per grid
    /// spot. Used for scenario analysis and calendar-style views.
    MarkToMarket,
}

/// Aggregate view of a strategy: payoff curve, portfolio greeks, net entry
/// cost.
///
/// The identity `curve(x) + net_cost = Σ direction·quantity·intrinsic(x)`
/// holds at every grid point of an expiration curve; net cost is the
/// vertical offset between the raw intrinsic profile and the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// Aggregate payoff sampled over the requested grid.
    pub curve: PriceCurve,
    /// Signed, quantity-weighted greek sums at the current spot.
    pub greeks: Greeks,
    /// Signed net premium: positive debit, negative credit.
    pub net_cost: NetCost,
}

/// A leg with its entry premium resolved (fixed entry price, or fair value
/// at the current market).
struct PricedLeg {
    leg: Leg,
    premium: f64,
}

/// Compose legs into the default expiration payoff curve.
///
/// See [`compose_at`] for the grid preconditions and error cases.
///
/// # Examples
/// ```
/// use optstrat::strategy::{compose, Leg};
/// use optstrat::types::{Direction, OptionType};
/// use optstrat::{curve, MarketState};
///
/// let market = MarketState::new(100.0, 0.30, 30.0 / 365.0, 0.05)?;
/// let legs = vec![
///     Leg::option(Direction::Long, OptionType::Call, 100.0, 1)?,
///     Leg::option(Direction::Long, OptionType::Put, 100.0, 1)?,
/// ];
/// let grid = curve::default_grid(market.spot())?;
/// let straddle = compose(&legs, &market, &grid)?;
/// assert!(straddle.net_cost.is_debit());
/// # Ok::<(), optstrat::StrategyError>(())
/// ```
pub fn compose(legs: &[Leg], market: &MarketState, grid: &[f64]) -> error::Result<Composition> {
    compose_at(legs, market, grid, CurveKind::Expiry)
}

/// Compose legs into a payoff curve of the requested [`CurveKind`].
///
/// # Errors
/// - [`StrategyError::InvalidInput`] for an empty leg list or a malformed
///   grid (fewer than two points, non-positive, not strictly increasing).
/// - [`StrategyError::GridCoverage`] when the grid fails to bracket every
///   referenced strike plus the current spot — breakeven detection over such
///   a curve would be unreliable, so the precondition is surfaced instead of
///   silently handled.
/// - Any pricing failure of any leg fails the whole composition; no partial
///   results.
pub fn compose_at(
    legs: &[Leg],
    market: &MarketState,
    grid: &[f64],
    kind: CurveKind,
) -> error::Result<Composition> {
    if legs.is_empty() {
        return Err(StrategyError::InvalidInput {
            message: "strategy needs at least one leg".into(),
        });
    }
    validate_grid(grid)?;
    check_coverage(legs, market, grid)?;

    let mut cache = QuoteCache::new(*market);
    let mut greeks = Greeks::default();
    let mut net_cost = 0.0;
    let mut priced = Vec::with_capacity(legs.len());

    for leg in legs {
        let weight = leg.weight();
        match leg.instrument() {
            Instrument::Vanilla(spec) => {
                let quote = cache.quote(spec.strike, spec.option_type)?;
                let premium = leg.entry_price().unwrap_or(quote.price);
                net_cost += weight * premium;
                greeks += quote.greeks.scaled(weight);
                priced.push(PricedLeg { leg: *leg, premium });
            }
            Instrument::Underlying => {
                // One delta per unit; no premium, no other sensitivities.
                greeks.delta += weight;
                priced.push(PricedLeg {
                    leg: *leg,
                    premium: 0.0,
                });
            }
        }
    }

    let points = curve_points(&priced, market, grid, kind)?;

    Ok(Composition {
        curve: PriceCurve::from_points(points),
        greeks,
        net_cost: NetCost(net_cost),
    })
}

fn check_coverage(legs: &[Leg], market: &MarketState, grid: &[f64]) -> error::Result<()> {
    let lo = grid[0];
    let hi = grid[grid.len() - 1];
    let spot = market.spot();
    if spot < lo || spot > hi {
        return Err(StrategyError::GridCoverage {
            message: format!("spot {spot} outside grid [{lo}, {hi}]"),
        });
    }
    for leg in legs {
        if let Instrument::Vanilla(spec) = leg.instrument() {
            if spec.strike < lo || spec.strike > hi {
                return Err(StrategyError::GridCoverage {
                    message: format!("strike {} outside grid [{lo}, {hi}]", spec.strike),
                });
            }
        }
    }
    Ok(())
}

fn curve_points(
    priced: &[PricedLeg],
    market: &MarketState,
    grid: &[f64],
    kind: CurveKind,
) -> error::Result<Vec<CurvePoint>> {
    // Mark-to-market sweeps one full Black-Scholes evaluation per leg per
    // grid point; the expiration sweep is a handful of max() calls and not
    // worth fanning out.
    #[cfg(feature = "parallel")]
    if kind == CurveKind::MarkToMarket {
        return grid
            .par_iter()
            .map(|&x| point_at(priced, market, x, kind))
            .collect();
    }
    grid.iter()
        .map(|&x| point_at(priced, market, x, kind))
        .collect()
}

fn point_at(
    priced: &[PricedLeg],
    market: &MarketState,
    x: f64,
    kind: CurveKind,
) -> error::Result<CurvePoint> {
    let mut payoff = 0.0;
    match kind {
        CurveKind::Expiry => {
            for p in priced {
                payoff += match p.leg.instrument() {
                    Instrument::Vanilla(spec) => {
                        p.leg.weight() * (spec.option_type.intrinsic(x, spec.strike) - p.premium)
                    }
                    Instrument::Underlying => p.leg.weight() * (x - market.spot()),
                };
            }
        }
        CurveKind::MarkToMarket => {
            let shifted = market.with_spot(x)?;
            for p in priced {
                payoff += match p.leg.instrument() {
                    Instrument::Vanilla(spec) => {
                        let quote = price_and_greeks(&shifted, spec.strike, spec.option_type)?;
                        p.leg.weight() * (quote.price - p.premium)
                    }
                    Instrument::Underlying => p.leg.weight() * (x - market.spot()),
                };
            }
        }
    }
    if !payoff.is_finite() {
        return Err(StrategyError::NumericalError {
            message: format!("non-finite payoff at grid spot {x}"),
        });
    }
    Ok(CurvePoint { spot: x, payoff })
}
