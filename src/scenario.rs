//! What-if evaluation: time decay plus spot and volatility shocks.
//!
//! Unlike the expiration payoff curve, a scenario re-values every option leg
//! by full Black-Scholes at the *remaining* time to expiry and at the shocked
//! spot/vol, then reports the change against each leg's entry premium. Once
//! elapsed time reaches the original expiry the remaining tenor floors at
//! zero and the pricing engine quotes intrinsic value, so the `T→0`
//! singularity is never re-entered. Held-open legs of calendar-style
//! structures are valued the same way, at the shorter leg's expiry, instead
//! of by any payoff-blending shortcut.

use serde::{Deserialize, Serialize};

use crate::error;
use crate::market::MarketState;
use crate::pricing::QuoteCache;
use crate::strategy::leg::{Instrument, Leg};
use crate::validate::{validate_non_negative, validate_positive};

/// Relative spot moves for the standard scenario ladder: ±20%, ±10%,
/// unchanged.
pub const STANDARD_MOVES: [f64; 5] = [-0.20, -0.10, 0.0, 0.10, 0.20];

/// One leg's outcome under a scenario. Values are signed position totals:
/// a short leg's `new_value` is the (negative) liability it represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegOutcome {
    /// Signed market value of the position after the shock.
    pub new_value: f64,
    /// Gain or loss against the entry premium. Long legs gain when value
    /// rises above the premium paid; short legs gain when it falls below
    /// the premium received.
    pub pnl: f64,
}

/// Per-leg and aggregate outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Outcome per leg, in input order.
    pub legs: Vec<LegOutcome>,
    /// Sum of signed position values.
    pub new_value: f64,
    /// Sum of per-leg PnL.
    pub pnl: f64,
}

/// A parameter shock: elapsed calendar time plus optional spot/vol
/// overrides. Unset overrides keep the original market's value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    elapsed_days: f64,
    spot: Option<f64>,
    vol: Option<f64>,
}

impl Scenario {
    /// Scenario advancing calendar time only.
    ///
    /// # Errors
    /// Returns [`StrategyError`](crate::StrategyError) for negative or
    /// non-finite elapsed days.
    pub fn new(elapsed_days: f64) -> error::Result<Self> {
        validate_non_negative(elapsed_days, "elapsed_days")?;
        Ok(Self {
            elapsed_days,
            spot: None,
            vol: None,
        })
    }

    /// Override the spot price after the shock.
    pub fn with_spot(mut self, spot: f64) -> error::Result<Self> {
        validate_positive(spot, "shocked spot")?;
        self.spot = Some(spot);
        Ok(self)
    }

    /// Override the implied volatility after the shock.
    pub fn with_vol(mut self, vol: f64) -> error::Result<Self> {
        validate_non_negative(vol, "shocked vol")?;
        self.vol = Some(vol);
        Ok(self)
    }

    /// Evaluate the legs under this scenario.
    ///
    /// Entry premiums come from each leg's fixed entry price, or fair value
    /// at the *original* market when unset — consistent with
    /// [`compose`](crate::strategy::compose).
    ///
    /// # Errors
    /// Propagates any validation or pricing failure; fails atomically.
    ///
    /// # Examples
    /// ```
    /// use optstrat::scenario::Scenario;
    /// use optstrat::strategy::Leg;
    /// use optstrat::types::{Direction, OptionType};
    /// use optstrat::MarketState;
    ///
    /// let market = MarketState::from_days(100.0, 0.30, 30, 0.05)?;
    /// let legs = vec![Leg::option(Direction::Long, OptionType::Call, 100.0, 1)?];
    /// let report = Scenario::new(7.0)?.with_spot(110.0)?.evaluate(&legs, &market)?;
    /// assert!(report.pnl > 0.0);
    /// # Ok::<(), optstrat::StrategyError>(())
    /// ```
    pub fn evaluate(&self, legs: &[Leg], market: &MarketState) -> error::Result<ScenarioReport> {
        let mut shocked = market.after_days(self.elapsed_days)?;
        if let Some(spot) = self.spot {
            shocked = shocked.with_spot(spot)?;
        }
        if let Some(vol) = self.vol {
            shocked = shocked.with_vol(vol)?;
        }

        let mut entry_quotes = QuoteCache::new(*market);
        let mut shocked_quotes = QuoteCache::new(shocked);

        let mut outcomes = Vec::with_capacity(legs.len());
        let mut total_value = 0.0;
        let mut total_pnl = 0.0;

        for leg in legs {
            let weight = leg.weight();
            let outcome = match leg.instrument() {
                Instrument::Vanilla(spec) => {
                    let entry = match leg.entry_price() {
                        Some(p) => p,
                        None => entry_quotes.quote(spec.strike, spec.option_type)?.price,
                    };
                    let unit = shocked_quotes.quote(spec.strike, spec.option_type)?.price;
                    LegOutcome {
                        new_value: weight * unit,
                        pnl: weight * (unit - entry),
                    }
                }
                Instrument::Underlying => LegOutcome {
                    new_value: weight * shocked.spot(),
                    pnl: weight * (shocked.spot() - market.spot()),
                },
            };
            total_value += outcome.new_value;
            total_pnl += outcome.pnl;
            outcomes.push(outcome);
        }

        Ok(ScenarioReport {
            legs: outcomes,
            new_value: total_value,
            pnl: total_pnl,
        })
    }
}

/// The standard ladder: one report per relative spot move at a fixed elapsed
/// time. Returns `(shocked_spot, report)` pairs in ladder order.
pub fn evaluate_spot_moves(
    legs: &[Leg],
    market: &MarketState,
    elapsed_days: f64,
    moves: &[f64],
) -> error::Result<Vec<(f64, ScenarioReport)>> {
    moves
        .iter()
        .map(|&m| {
            let spot = market.spot() * (1.0 + m);
            let report = Scenario::new(elapsed_days)?
                .with_spot(spot)?
                .evaluate(legs, market)?;
            Ok((spot, report))
        })
        .collect()
}
