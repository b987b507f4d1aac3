//! Black-Scholes valuation of European vanilla options.
//!
//! The closed form prices a call as
//!
//! ```text
//! C = S·Φ(d1) − K·e^(−rT)·Φ(d2)
//! d1 = (ln(S/K) + (r + σ²/2)·T) / (σ√T)
//! d2 = d1 − σ√T
//! ```
//!
//! and a put via the symmetric formula `P = K·e^(−rT)·Φ(−d2) − S·Φ(−d1)`.
//!
//! Theta is reported per calendar day and vega per percentage-point vol move
//! (see [`conventions`](crate::conventions)); both rescalings happen here and
//! nowhere else.

use std::collections::HashMap;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

use crate::conventions::{discount_factor, per_calendar_day, per_vol_point};
use crate::error::{self, StrategyError};
use crate::market::MarketState;
use crate::types::OptionType;
use crate::validate::validate_positive;

/// Expiry floor below which an option is treated as expired and quoted at
/// intrinsic value. Matches the day-count resolution a one-second tenor is
/// already below.
pub const MIN_EXPIRY: f64 = 1e-6;

/// Volatility floor below which the quote collapses to discounted intrinsic
/// value rather than feeding a near-zero σ into the d1 division.
pub const MIN_VOL: f64 = 1e-8;

/// First-order and second-order sensitivities of an option value.
///
/// Units follow retail quoting convention: `delta` and `gamma` are per unit
/// of spot, `theta` is value decay per calendar day, `vega` is value change
/// per one percentage-point move in implied volatility.
///
/// Greeks are linear in position size, so signed, quantity-weighted sums of
/// per-leg values aggregate exactly — [`scaled`](Greeks::scaled) and `+` are
/// all composition needs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S.
    pub delta: f64,
    /// ∂²V/∂S², identical for calls and puts.
    pub gamma: f64,
    /// ∂V/∂t per calendar day.
    pub theta: f64,
    /// ∂V/∂σ per percentage point.
    pub vega: f64,
}

impl Greeks {
    /// Greeks scaled by a signed position weight (direction × quantity).
    pub fn scaled(&self, weight: f64) -> Greeks {
        Greeks {
            delta: weight * self.delta,
            gamma: weight * self.gamma,
            theta: weight * self.theta,
            vega: weight * self.vega,
        }
    }
}

impl Add for Greeks {
    type Output = Greeks;
    fn add(self, rhs: Greeks) -> Greeks {
        Greeks {
            delta: self.delta + rhs.delta,
            gamma: self.gamma + rhs.gamma,
            theta: self.theta + rhs.theta,
            vega: self.vega + rhs.vega,
        }
    }
}

impl AddAssign for Greeks {
    fn add_assign(&mut self, rhs: Greeks) {
        *self = *self + rhs;
    }
}

/// Fair value plus sensitivities for one option contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Present value of the contract.
    pub price: f64,
    /// Sensitivities at the quoted market state.
    pub greeks: Greeks,
}

fn norm_cdf(x: f64) -> f64 {
    Normal::standard().cdf(x)
}

fn norm_pdf(x: f64) -> f64 {
    Normal::standard().pdf(x)
}

/// Quote at expiry: intrinsic value, delta pinned to 0 or ±1 by moneyness,
/// all other sensitivities zero.
fn expired_quote(option_type: OptionType, spot: f64, strike: f64) -> OptionQuote {
    let delta = match option_type {
        OptionType::Call => {
            if spot > strike {
                1.0
            } else {
                0.0
            }
        }
        OptionType::Put => {
            if spot < strike {
                -1.0
            } else {
                0.0
            }
        }
    };
    OptionQuote {
        price: option_type.intrinsic(spot, strike),
        greeks: Greeks {
            delta,
            ..Greeks::default()
        },
    }
}

/// Quote in the zero-volatility limit: discounted intrinsic value against the
/// present value of the strike, delta pinned by forward moneyness.
fn zero_vol_quote(option_type: OptionType, spot: f64, strike: f64, df: f64) -> OptionQuote {
    let pv_strike = strike * df;
    let (price, delta) = match option_type {
        OptionType::Call => ((spot - pv_strike).max(0.0), if spot > pv_strike { 1.0 } else { 0.0 }),
        OptionType::Put => (
            (pv_strike - spot).max(0.0),
            if spot < pv_strike { -1.0 } else { 0.0 },
        ),
    };
    OptionQuote {
        price,
        greeks: Greeks {
            delta,
            ..Greeks::default()
        },
    }
}

/// Price one European option and its greeks.
///
/// Degenerate-input policy (not an error): expiry at or below [`MIN_EXPIRY`]
/// quotes intrinsic value, volatility at or below [`MIN_VOL`] quotes
/// discounted intrinsic value; both with sensitivities pinned to their
/// limits.
///
/// # Errors
/// Returns [`StrategyError::InvalidInput`] for a non-positive strike
/// (spot positivity is guaranteed by [`MarketState`]), and
/// [`StrategyError::NumericalError`] if d1/d2 or the resulting price come
/// out non-finite despite valid inputs.
///
/// # Examples
/// ```
/// use optstrat::pricing::price_and_greeks;
/// use optstrat::types::OptionType;
/// use optstrat::MarketState;
///
/// let market = MarketState::new(100.0, 0.20, 1.0, 0.05)?;
/// let call = price_and_greeks(&market, 100.0, OptionType::Call)?;
/// assert!((call.price - 10.45).abs() < 0.01);
/// assert!(call.greeks.delta > 0.5 && call.greeks.delta < 1.0);
/// # Ok::<(), optstrat::StrategyError>(())
/// ```
pub fn price_and_greeks(
    market: &MarketState,
    strike: f64,
    option_type: OptionType,
) -> error::Result<OptionQuote> {
    validate_positive(strike, "strike")?;

    let (s, sigma, t, r) = (market.spot(), market.vol(), market.expiry(), market.rate());

    if t <= MIN_EXPIRY {
        return Ok(expired_quote(option_type, s, strike));
    }
    let df = discount_factor(r, t);
    if sigma <= MIN_VOL {
        return Ok(zero_vol_quote(option_type, s, strike, df));
    }

    let sqrt_t = t.sqrt();
    let sigma_sqrt_t = sigma * sqrt_t;
    let d1 = ((s / strike).ln() + (r + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;
    if !d1.is_finite() || !d2.is_finite() {
        return Err(StrategyError::NumericalError {
            message: format!("non-finite d1/d2 for S={s}, K={strike}, sigma={sigma}, T={t}"),
        });
    }

    let nd1 = norm_cdf(d1);
    let pdf1 = norm_pdf(d1);

    let (price, delta, strike_decay) = match option_type {
        OptionType::Call => (
            s * nd1 - strike * df * norm_cdf(d2),
            nd1,
            -r * strike * df * norm_cdf(d2),
        ),
        OptionType::Put => (
            strike * df * norm_cdf(-d2) - s * norm_cdf(-d1),
            nd1 - 1.0,
            r * strike * df * norm_cdf(-d2),
        ),
    };

    let gamma = pdf1 / (s * sigma_sqrt_t);
    let vega = per_vol_point(s * pdf1 * sqrt_t);
    let theta = per_calendar_day(-s * pdf1 * sigma / (2.0 * sqrt_t) + strike_decay);

    if !price.is_finite() {
        return Err(StrategyError::NumericalError {
            message: format!("non-finite price for S={s}, K={strike}, sigma={sigma}, T={t}"),
        });
    }

    Ok(OptionQuote {
        price,
        greeks: Greeks {
            delta,
            gamma,
            theta,
            vega,
        },
    })
}

/// Per-call memo of quotes keyed by (strike bits, option kind).
///
/// Scoped to one market state: a fresh cache is built for every compose or
/// scenario call, so a changed [`MarketState`] can never serve stale quotes.
/// Legs sharing a `(strike, kind)` pair, such as the two written middle legs
/// of a butterfly, hit the engine once.
pub(crate) struct QuoteCache {
    market: MarketState,
    quotes: HashMap<(u64, OptionType), OptionQuote>,
}

impl QuoteCache {
    pub(crate) fn new(market: MarketState) -> Self {
        Self {
            market,
            quotes: HashMap::new(),
        }
    }

    pub(crate) fn quote(
        &mut self,
        strike: f64,
        option_type: OptionType,
    ) -> error::Result<OptionQuote> {
        let key = (strike.to_bits(), option_type);
        if let Some(&hit) = self.quotes.get(&key) {
            return Ok(hit);
        }
        let quote = price_and_greeks(&self.market, strike, option_type)?;
        self.quotes.insert(key, quote);
        Ok(quote)
    }
}
