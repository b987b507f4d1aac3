//! Market state supplied to every pricing and composition call.
//!
//! [`MarketState`] is immutable per evaluation: shock methods return a new
//! value rather than mutating in place, so a state can be shared freely
//! across threads and repeated calls are bit-for-bit reproducible.

use serde::{Deserialize, Serialize};

use crate::conventions;
use crate::error::{self, StrategyError};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Market parameters for one evaluation: spot, volatility, time to expiry,
/// risk-free rate.
///
/// Invariants enforced on construction (and on deserialization):
/// `spot > 0`, `vol ≥ 0`, `expiry ≥ 0`, `rate` finite (any sign). The rate is
/// an explicit field rather than a module constant so the engine is testable
/// with varying rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MarketStateRaw", into = "MarketStateRaw")]
pub struct MarketState {
    spot: f64,
    vol: f64,
    expiry: f64,
    rate: f64,
}

#[derive(Serialize, Deserialize)]
struct MarketStateRaw {
    spot: f64,
    vol: f64,
    expiry: f64,
    rate: f64,
}

impl TryFrom<MarketStateRaw> for MarketState {
    type Error = StrategyError;
    fn try_from(raw: MarketStateRaw) -> Result<Self, Self::Error> {
        Self::new(raw.spot, raw.vol, raw.expiry, raw.rate)
    }
}

impl From<MarketState> for MarketStateRaw {
    fn from(m: MarketState) -> Self {
        Self {
            spot: m.spot,
            vol: m.vol,
            expiry: m.expiry,
            rate: m.rate,
        }
    }
}

impl MarketState {
    /// Create a market state from annualized parameters.
    ///
    /// # Errors
    /// Returns [`StrategyError::InvalidInput`] for non-positive spot,
    /// negative vol or expiry, or any non-finite value.
    ///
    /// # Examples
    /// ```
    /// use optstrat::MarketState;
    /// let market = MarketState::new(100.0, 0.30, 30.0 / 365.0, 0.045)?;
    /// assert_eq!(market.spot(), 100.0);
    /// # Ok::<(), optstrat::StrategyError>(())
    /// ```
    pub fn new(spot: f64, vol: f64, expiry: f64, rate: f64) -> error::Result<Self> {
        validate_positive(spot, "spot")?;
        validate_non_negative(vol, "vol")?;
        validate_non_negative(expiry, "expiry")?;
        validate_finite(rate, "rate")?;
        Ok(Self {
            spot,
            vol,
            expiry,
            rate,
        })
    }

    /// Create a market state from an integer day count, the convention user
    /// interfaces collect expiry in.
    pub fn from_days(spot: f64, vol: f64, days_to_expiry: u32, rate: f64) -> error::Result<Self> {
        Self::new(spot, vol, conventions::year_fraction(days_to_expiry), rate)
    }

    /// Spot price S.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Annualized volatility σ.
    pub fn vol(&self) -> f64 {
        self.vol
    }

    /// Time to expiry T in years.
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Continuously-compounded risk-free rate r.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Same market with a different spot.
    pub fn with_spot(&self, spot: f64) -> error::Result<Self> {
        Self::new(spot, self.vol, self.expiry, self.rate)
    }

    /// Same market with a different volatility.
    pub fn with_vol(&self, vol: f64) -> error::Result<Self> {
        Self::new(self.spot, vol, self.expiry, self.rate)
    }

    /// Market after `elapsed_days` of calendar time. Remaining expiry is
    /// floored at zero, so advancing past expiry is valid and yields a state
    /// the pricing engine treats as expired.
    pub fn after_days(&self, elapsed_days: f64) -> error::Result<Self> {
        validate_non_negative(elapsed_days, "elapsed_days")?;
        let remaining = (self.expiry - elapsed_days / conventions::DAYS_PER_YEAR).max(0.0);
        Self::new(self.spot, self.vol, remaining, self.rate)
    }
}
