//! Position legs: one directional stake in an option contract or the
//! underlying itself.
//!
//! A [`Leg`] is immutable once built from user-chosen strikes; direction
//! carries the sign and `quantity` stays a positive contract count. The
//! optional `entry_price` records the premium actually paid or received —
//! when absent, the composer prices the leg at Black-Scholes fair value.

use serde::{Deserialize, Serialize};

use crate::error::{self, StrategyError};
use crate::types::{Direction, OptionType};
use crate::validate::{validate_non_negative, validate_positive, validate_quantity};

/// One option contract's terms, independent of position size or direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Call or put.
    pub option_type: OptionType,
    /// Exercise price K.
    pub strike: f64,
}

/// What a leg holds: a vanilla option or the underlying asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Instrument {
    /// European vanilla option.
    Vanilla(OptionSpec),
    /// The underlying asset, one unit per quantity.
    Underlying,
}

/// One directional position within a multi-part strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LegRaw", into = "LegRaw")]
pub struct Leg {
    instrument: Instrument,
    direction: Direction,
    quantity: u32,
    entry_price: Option<f64>,
}

#[derive(Serialize, Deserialize)]
struct LegRaw {
    instrument: Instrument,
    direction: Direction,
    quantity: u32,
    entry_price: Option<f64>,
}

impl TryFrom<LegRaw> for Leg {
    type Error = StrategyError;
    fn try_from(raw: LegRaw) -> Result<Self, Self::Error> {
        let leg = match raw.instrument {
            Instrument::Vanilla(spec) => {
                Leg::option(raw.direction, spec.option_type, spec.strike, raw.quantity)?
            }
            Instrument::Underlying => Leg::underlying(raw.direction, raw.quantity)?,
        };
        match raw.entry_price {
            Some(p) => leg.with_entry_price(p),
            None => Ok(leg),
        }
    }
}

impl From<Leg> for LegRaw {
    fn from(leg: Leg) -> Self {
        Self {
            instrument: leg.instrument,
            direction: leg.direction,
            quantity: leg.quantity,
            entry_price: leg.entry_price,
        }
    }
}

impl Leg {
    /// An option leg.
    ///
    /// # Errors
    /// Returns [`StrategyError::InvalidInput`] for a non-positive strike or
    /// zero quantity.
    ///
    /// # Examples
    /// ```
    /// use optstrat::strategy::Leg;
    /// use optstrat::types::{Direction, OptionType};
    ///
    /// let leg = Leg::option(Direction::Short, OptionType::Put, 95.0, 2)?;
    /// assert_eq!(leg.quantity(), 2);
    /// # Ok::<(), optstrat::StrategyError>(())
    /// ```
    pub fn option(
        direction: Direction,
        option_type: OptionType,
        strike: f64,
        quantity: u32,
    ) -> error::Result<Self> {
        validate_positive(strike, "strike")?;
        validate_quantity(quantity)?;
        Ok(Self {
            instrument: Instrument::Vanilla(OptionSpec {
                option_type,
                strike,
            }),
            direction,
            quantity,
            entry_price: None,
        })
    }

    /// A position in the underlying, one unit per quantity.
    pub fn underlying(direction: Direction, quantity: u32) -> error::Result<Self> {
        validate_quantity(quantity)?;
        Ok(Self {
            instrument: Instrument::Underlying,
            direction,
            quantity,
            entry_price: None,
        })
    }

    /// Pin the premium paid/received at construction instead of letting the
    /// composer price the leg at fair value. The premium is unsigned;
    /// direction decides whether it was paid or received.
    ///
    /// # Errors
    /// Returns [`StrategyError::InvalidInput`] for a negative or non-finite
    /// premium, or when set on an underlying leg (which has no premium).
    pub fn with_entry_price(mut self, premium: f64) -> error::Result<Self> {
        if matches!(self.instrument, Instrument::Underlying) {
            return Err(StrategyError::InvalidInput {
                message: "underlying legs carry no entry premium".into(),
            });
        }
        validate_non_negative(premium, "entry premium")?;
        self.entry_price = Some(premium);
        Ok(self)
    }

    /// The instrument held.
    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Long or short.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Contract count, always positive.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Premium fixed at construction, if any.
    pub fn entry_price(&self) -> Option<f64> {
        self.entry_price
    }

    /// Signed position weight: direction sign × quantity.
    pub(crate) fn weight(&self) -> f64 {
        self.direction.sign() * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_leg_validates_inputs() {
        assert!(Leg::option(Direction::Long, OptionType::Call, 100.0, 1).is_ok());
        assert!(Leg::option(Direction::Long, OptionType::Call, 0.0, 1).is_err());
        assert!(Leg::option(Direction::Long, OptionType::Call, -5.0, 1).is_err());
        assert!(Leg::option(Direction::Long, OptionType::Call, 100.0, 0).is_err());
        assert!(Leg::underlying(Direction::Short, 0).is_err());
    }

    #[test]
    fn weight_is_signed_quantity() {
        let long = Leg::option(Direction::Long, OptionType::Call, 100.0, 3).unwrap();
        assert_eq!(long.weight(), 3.0);
        let short = Leg::option(Direction::Short, OptionType::Put, 100.0, 2).unwrap();
        assert_eq!(short.weight(), -2.0);
    }

    #[test]
    fn entry_price_rules() {
        let leg = Leg::option(Direction::Long, OptionType::Call, 100.0, 1).unwrap();
        assert_eq!(leg.entry_price(), None);
        let priced = leg.with_entry_price(5.0).unwrap();
        assert_eq!(priced.entry_price(), Some(5.0));
        assert!(leg.with_entry_price(-1.0).is_err());
        assert!(leg.with_entry_price(f64::NAN).is_err());

        let shares = Leg::underlying(Direction::Long, 1).unwrap();
        assert!(shares.with_entry_price(5.0).is_err());
    }

    #[test]
    fn serde_roundtrip_validates() {
        let leg = Leg::option(Direction::Short, OptionType::Put, 95.0, 2)
            .unwrap()
            .with_entry_price(4.0)
            .unwrap();
        let json = serde_json::to_string(&leg).unwrap();
        let back: Leg = serde_json::from_str(&json).unwrap();
        assert_eq!(leg, back);

        let bad = json.replace("\"quantity\":2", "\"quantity\":0");
        assert!(serde_json::from_str::<Leg>(&bad).is_err());
    }
}
