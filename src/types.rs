//! Core domain types for strategy construction and pricing.
//!
//! # Newtype Strategy
//!
//! **Outputs use newtypes** — [`NetCost`] wraps the signed entry cost so a
//! caller can't silently confuse a credit with a debit.
//!
//! **Inputs use bare `f64`** — API methods like `price_and_greeks(market,
//! strike, ..)` accept raw floats for ergonomics. Requiring a wrapper at
//! every call site adds ceremony without meaningful safety (the caller
//! already knows they're passing a strike). Validation happens inside
//! constructors and the composer.
//!
//! # Why no `Eq` or `Ord` on `NetCost`?
//! It wraps `f64`, which does not implement `Eq` or `Ord` because `NaN`
//! breaks total ordering. We derive `PartialEq` and `PartialOrd` only.

use serde::{Deserialize, Serialize};

/// Option contract kind: call or put.
///
/// Selects the pricing formula branch and the intrinsic payoff shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to buy at the strike price.
    Call,
    /// Right to sell at the strike price.
    Put,
}

impl OptionType {
    /// Payoff the option would deliver if exercised immediately:
    /// `max(S − K, 0)` for a call, `max(K − S, 0)` for a put.
    ///
    /// # Examples
    /// ```
    /// use optstrat::types::OptionType;
    /// assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
    /// assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    /// ```
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

/// Position direction within a leg.
///
/// Direction alone encodes sign; leg quantities stay positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Bought position: pays premium, receives payoff.
    Long,
    /// Sold (written) position: receives premium, owes payoff.
    Short,
}

impl Direction {
    /// Sign applied to a leg's payoff, greeks, and premium: +1 long, −1 short.
    ///
    /// # Examples
    /// ```
    /// use optstrat::types::Direction;
    /// assert_eq!(Direction::Long.sign(), 1.0);
    /// assert_eq!(Direction::Short.sign(), -1.0);
    /// ```
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

/// Signed net premium to enter a strategy.
///
/// Positive = debit (amount paid up front), negative = credit (amount
/// received). Equals the vertical offset between the raw intrinsic curve and
/// the aggregate payoff curve.
///
/// # Examples
/// ```
/// use optstrat::types::NetCost;
/// let credit = NetCost(-2.0);
/// assert!(credit.is_credit());
/// assert_eq!(credit.abs(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct NetCost(pub f64);

impl NetCost {
    /// True when entering the strategy costs money (premium paid).
    pub fn is_debit(&self) -> bool {
        self.0 > 0.0
    }

    /// True when entering the strategy pays money (premium received).
    pub fn is_credit(&self) -> bool {
        self.0 < 0.0
    }

    /// Magnitude of the cost or credit.
    pub fn abs(&self) -> f64 {
        self.0.abs()
    }
}
