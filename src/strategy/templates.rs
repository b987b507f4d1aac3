//! Declarative leg templates for the standard strategy catalogue.
//!
//! Every strategy is a [`StrategyKind`] paired with a [`StrikeParams`] shape;
//! [`StrategyKind::legs`] expands the pair into the leg list the composer
//! consumes uniformly. This replaces per-strategy payoff math with one
//! composition path: the only strategy-specific code left is the leg recipe
//! and its strike-ordering precondition.
//!
//! Butterflies ride the four-strike shape with the middle strikes equal, so
//! an iron butterfly is the `k2 == k3` limit of an iron condor and the
//! composer's quote memoization collapses the doubled middle leg to a single
//! pricing call.

use serde::{Deserialize, Serialize};

use crate::error::{self, StrategyError};
use crate::strategy::leg::Leg;
use crate::types::{Direction, OptionType};

use Direction::{Long, Short};
use OptionType::{Call, Put};

/// Strike parameters, tagged by shape.
///
/// Orderings are preconditions checked by [`StrategyKind::legs`], not
/// silently repaired: the payoff-shape assumptions downstream (inner/outer
/// breakevens, profit tunnels) depend on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StrikeParams {
    /// One strike shared by every option leg.
    SingleStrike { strike: f64 },
    /// Two strikes with `lower < upper`.
    TwoStrike { lower: f64, upper: f64 },
    /// Four strikes with `k1 < k2 ≤ k3 < k4`. Middle equality is the
    /// butterfly limit.
    FourStrike { k1: f64, k2: f64, k3: f64, k4: f64 },
    /// An OTM put below an OTM call: `put_strike < call_strike`.
    StrangleShaped { put_strike: f64, call_strike: f64 },
}

/// Broad behavioural grouping, used only for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyCategory {
    /// Outright directional bets.
    Directional,
    /// Premium-collection against held stock.
    Income,
    /// Downside insurance on held stock.
    Protective,
    /// Two-leg debit/credit spreads.
    Spread,
    /// Long-volatility plays.
    Volatility,
    /// Range-bound premium sellers.
    Neutral,
}

/// Descriptive metadata for one strategy. Pass-through content for
/// presentation; nothing here feeds computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyInfo {
    pub name: &'static str,
    pub category: StrategyCategory,
    pub description: &'static str,
    pub construction: &'static str,
    pub max_profit: &'static str,
    pub max_loss: &'static str,
    pub breakeven: &'static str,
}

/// The strategy catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    LongCall,
    LongPut,
    CoveredCall,
    ProtectivePut,
    Collar,
    BullCallSpread,
    BearPutSpread,
    BullPutSpread,
    BearCallSpread,
    LongStraddle,
    LongStrangle,
    IronCondor,
    IronButterfly,
    LongCallButterfly,
}

impl StrategyKind {
    /// Every catalogued strategy, in presentation order.
    pub const ALL: [StrategyKind; 14] = [
        StrategyKind::LongCall,
        StrategyKind::LongPut,
        StrategyKind::CoveredCall,
        StrategyKind::ProtectivePut,
        StrategyKind::Collar,
        StrategyKind::BullCallSpread,
        StrategyKind::BearPutSpread,
        StrategyKind::BullPutSpread,
        StrategyKind::BearCallSpread,
        StrategyKind::LongStraddle,
        StrategyKind::LongStrangle,
        StrategyKind::IronCondor,
        StrategyKind::IronButterfly,
        StrategyKind::LongCallButterfly,
    ];

    /// Expand this strategy into its leg list.
    ///
    /// # Errors
    /// [`StrategyError::InvalidInput`] when `params` has the wrong shape for
    /// the strategy, [`StrategyError::UnorderedStrikes`] when the shape is
    /// right but the ordering precondition is violated.
    ///
    /// # Examples
    /// ```
    /// use optstrat::strategy::{StrategyKind, StrikeParams};
    ///
    /// let legs = StrategyKind::IronCondor.legs(StrikeParams::FourStrike {
    ///     k1: 85.0,
    ///     k2: 95.0,
    ///     k3: 105.0,
    ///     k4: 115.0,
    /// })?;
    /// assert_eq!(legs.len(), 4);
    /// # Ok::<(), optstrat::StrategyError>(())
    /// ```
    pub fn legs(&self, params: StrikeParams) -> error::Result<Vec<Leg>> {
        use StrikeParams::*;
        match (*self, params) {
            (StrategyKind::LongCall, SingleStrike { strike }) => {
                Ok(vec![Leg::option(Long, Call, strike, 1)?])
            }
            (StrategyKind::LongPut, SingleStrike { strike }) => {
                Ok(vec![Leg::option(Long, Put, strike, 1)?])
            }
            (StrategyKind::CoveredCall, SingleStrike { strike }) => Ok(vec![
                Leg::underlying(Long, 1)?,
                Leg::option(Short, Call, strike, 1)?,
            ]),
            (StrategyKind::ProtectivePut, SingleStrike { strike }) => Ok(vec![
                Leg::underlying(Long, 1)?,
                Leg::option(Long, Put, strike, 1)?,
            ]),
            (
                StrategyKind::Collar,
                StrangleShaped {
                    put_strike,
                    call_strike,
                },
            ) => {
                self.require_below(put_strike, call_strike, "put strike", "call strike")?;
                Ok(vec![
                    Leg::underlying(Long, 1)?,
                    Leg::option(Long, Put, put_strike, 1)?,
                    Leg::option(Short, Call, call_strike, 1)?,
                ])
            }
            (StrategyKind::BullCallSpread, TwoStrike { lower, upper }) => {
                self.require_below(lower, upper, "lower strike", "upper strike")?;
                Ok(vec![
                    Leg::option(Long, Call, lower, 1)?,
                    Leg::option(Short, Call, upper, 1)?,
                ])
            }
            (StrategyKind::BearPutSpread, TwoStrike { lower, upper }) => {
                self.require_below(lower, upper, "lower strike", "upper strike")?;
                Ok(vec![
                    Leg::option(Long, Put, upper, 1)?,
                    Leg::option(Short, Put, lower, 1)?,
                ])
            }
            (StrategyKind::BullPutSpread, TwoStrike { lower, upper }) => {
                self.require_below(lower, upper, "lower strike", "upper strike")?;
                Ok(vec![
                    Leg::option(Short, Put, upper, 1)?,
                    Leg::option(Long, Put, lower, 1)?,
                ])
            }
            (StrategyKind::BearCallSpread, TwoStrike { lower, upper }) => {
                self.require_below(lower, upper, "lower strike", "upper strike")?;
                Ok(vec![
                    Leg::option(Short, Call, lower, 1)?,
                    Leg::option(Long, Call, upper, 1)?,
                ])
            }
            (StrategyKind::LongStraddle, SingleStrike { strike }) => Ok(vec![
                Leg::option(Long, Call, strike, 1)?,
                Leg::option(Long, Put, strike, 1)?,
            ]),
            (
                StrategyKind::LongStrangle,
                StrangleShaped {
                    put_strike,
                    call_strike,
                },
            ) => {
                self.require_below(put_strike, call_strike, "put strike", "call strike")?;
                Ok(vec![
                    Leg::option(Long, Put, put_strike, 1)?,
                    Leg::option(Long, Call, call_strike, 1)?,
                ])
            }
            (StrategyKind::IronCondor, FourStrike { k1, k2, k3, k4 }) => {
                self.require_below(k1, k2, "k1", "k2")?;
                self.require_below(k2, k3, "k2", "k3")?;
                self.require_below(k3, k4, "k3", "k4")?;
                Ok(vec![
                    Leg::option(Long, Put, k1, 1)?,
                    Leg::option(Short, Put, k2, 1)?,
                    Leg::option(Short, Call, k3, 1)?,
                    Leg::option(Long, Call, k4, 1)?,
                ])
            }
            (StrategyKind::IronButterfly, FourStrike { k1, k2, k3, k4 }) => {
                self.require_below(k1, k2, "k1", "k2")?;
                self.require_equal_middle(k2, k3)?;
                self.require_below(k3, k4, "k3", "k4")?;
                Ok(vec![
                    Leg::option(Long, Put, k1, 1)?,
                    Leg::option(Short, Put, k2, 1)?,
                    Leg::option(Short, Call, k3, 1)?,
                    Leg::option(Long, Call, k4, 1)?,
                ])
            }
            (StrategyKind::LongCallButterfly, FourStrike { k1, k2, k3, k4 }) => {
                self.require_below(k1, k2, "k1", "k2")?;
                self.require_equal_middle(k2, k3)?;
                self.require_below(k3, k4, "k3", "k4")?;
                Ok(vec![
                    Leg::option(Long, Call, k1, 1)?,
                    Leg::option(Short, Call, k2, 1)?,
                    Leg::option(Short, Call, k3, 1)?,
                    Leg::option(Long, Call, k4, 1)?,
                ])
            }
            (kind, params) => Err(StrategyError::InvalidInput {
                message: format!(
                    "{} takes {} parameters, got {params:?}",
                    kind.info().name,
                    kind.expected_shape()
                ),
            }),
        }
    }

    fn expected_shape(&self) -> &'static str {
        match self {
            StrategyKind::LongCall
            | StrategyKind::LongPut
            | StrategyKind::CoveredCall
            | StrategyKind::ProtectivePut
            | StrategyKind::LongStraddle => "SingleStrike",
            StrategyKind::BullCallSpread
            | StrategyKind::BearPutSpread
            | StrategyKind::BullPutSpread
            | StrategyKind::BearCallSpread => "TwoStrike",
            StrategyKind::Collar | StrategyKind::LongStrangle => "StrangleShaped",
            StrategyKind::IronCondor
            | StrategyKind::IronButterfly
            | StrategyKind::LongCallButterfly => "FourStrike",
        }
    }

    fn require_below(
        &self,
        lo: f64,
        hi: f64,
        lo_name: &str,
        hi_name: &str,
    ) -> error::Result<()> {
        if !(lo < hi) {
            return Err(StrategyError::UnorderedStrikes {
                message: format!("{lo_name} ({lo}) must be below {hi_name} ({hi})"),
                template: self.info().name,
            });
        }
        Ok(())
    }

    fn require_equal_middle(&self, k2: f64, k3: f64) -> error::Result<()> {
        if k2 != k3 {
            return Err(StrategyError::UnorderedStrikes {
                message: format!("middle strikes must coincide for a butterfly, got {k2} and {k3}"),
                template: self.info().name,
            });
        }
        Ok(())
    }

    /// Descriptive metadata for presentation.
    pub fn info(&self) -> StrategyInfo {
        match self {
            StrategyKind::LongCall => StrategyInfo {
                name: "Long Call",
                category: StrategyCategory::Directional,
                description: "Buy a call expecting a strong rise; risk capped at the premium.",
                construction: "Buy 1 call",
                max_profit: "Unlimited",
                max_loss: "Premium paid",
                breakeven: "Strike + premium",
            },
            StrategyKind::LongPut => StrategyInfo {
                name: "Long Put",
                category: StrategyCategory::Directional,
                description: "Buy a put expecting a strong fall; risk capped at the premium.",
                construction: "Buy 1 put",
                max_profit: "Strike − premium (spot can only fall to zero)",
                max_loss: "Premium paid",
                breakeven: "Strike − premium",
            },
            StrategyKind::CoveredCall => StrategyInfo {
                name: "Covered Call",
                category: StrategyCategory::Income,
                description: "Hold stock and write a call against it, trading upside for income.",
                construction: "Hold stock + sell 1 OTM call",
                max_profit: "(Strike − spot) + premium",
                max_loss: "Stock can fall to zero, cushioned by the premium",
                breakeven: "Spot − premium",
            },
            StrategyKind::ProtectivePut => StrategyInfo {
                name: "Protective Put",
                category: StrategyCategory::Protective,
                description: "Insure held stock with a put, keeping the upside.",
                construction: "Hold stock + buy 1 put",
                max_profit: "Unlimited",
                max_loss: "(Spot − strike) + premium",
                breakeven: "Spot + premium",
            },
            StrategyKind::Collar => StrategyInfo {
                name: "Collar",
                category: StrategyCategory::Protective,
                description: "Put protection financed by a written call; both tails capped.",
                construction: "Hold stock + buy OTM put + sell OTM call",
                max_profit: "Call strike − spot ± net premium",
                max_loss: "Spot − put strike ± net premium",
                breakeven: "Spot adjusted by net premium (often near zero-cost)",
            },
            StrategyKind::BullCallSpread => StrategyInfo {
                name: "Bull Call Spread",
                category: StrategyCategory::Spread,
                description: "Cheaper bullish bet: long call financed by a higher short call.",
                construction: "Buy call at lower strike + sell call at upper strike",
                max_profit: "Strike width − net premium",
                max_loss: "Net premium paid",
                breakeven: "Lower strike + net premium",
            },
            StrategyKind::BearPutSpread => StrategyInfo {
                name: "Bear Put Spread",
                category: StrategyCategory::Spread,
                description: "Cheaper bearish bet: long put financed by a lower short put.",
                construction: "Buy put at upper strike + sell put at lower strike",
                max_profit: "Strike width − net premium",
                max_loss: "Net premium paid",
                breakeven: "Upper strike − net premium",
            },
            StrategyKind::BullPutSpread => StrategyInfo {
                name: "Bull Put Spread",
                category: StrategyCategory::Spread,
                description: "Credit spread profiting when spot holds above the short put.",
                construction: "Sell put at upper strike + buy put at lower strike",
                max_profit: "Net credit received",
                max_loss: "Strike width − credit",
                breakeven: "Upper strike − credit",
            },
            StrategyKind::BearCallSpread => StrategyInfo {
                name: "Bear Call Spread",
                category: StrategyCategory::Spread,
                description: "Credit spread profiting when spot holds below the short call.",
                construction: "Sell call at lower strike + buy call at upper strike",
                max_profit: "Net credit received",
                max_loss: "Strike width − credit",
                breakeven: "Lower strike + credit",
            },
            StrategyKind::LongStraddle => StrategyInfo {
                name: "Long Straddle",
                category: StrategyCategory::Volatility,
                description: "Call plus put at the same strike; direction-agnostic big-move bet.",
                construction: "Buy 1 ATM call + buy 1 ATM put, same strike",
                max_profit: "Unlimited",
                max_loss: "Sum of both premiums",
                breakeven: "Strike ± total premium (two points)",
            },
            StrategyKind::LongStrangle => StrategyInfo {
                name: "Long Strangle",
                category: StrategyCategory::Volatility,
                description: "Cheaper straddle with OTM wings; needs a bigger move.",
                construction: "Buy OTM put + buy OTM call",
                max_profit: "Unlimited",
                max_loss: "Sum of both premiums",
                breakeven: "Put strike − total premium / call strike + total premium",
            },
            StrategyKind::IronCondor => StrategyInfo {
                name: "Iron Condor",
                category: StrategyCategory::Neutral,
                description: "Short put spread plus short call spread; profits in the tunnel.",
                construction: "Buy put k1 + sell put k2 + sell call k3 + buy call k4",
                max_profit: "Net credit received",
                max_loss: "Wing width − credit",
                breakeven: "Inner strikes ± credit (two points)",
            },
            StrategyKind::IronButterfly => StrategyInfo {
                name: "Iron Butterfly",
                category: StrategyCategory::Neutral,
                description: "Condor with both short strikes at the body; tighter, richer credit.",
                construction: "Buy put k1 + sell put and call at the middle + buy call k4",
                max_profit: "Net credit received",
                max_loss: "Wing width − credit",
                breakeven: "Middle strike ± credit",
            },
            StrategyKind::LongCallButterfly => StrategyInfo {
                name: "Long Call Butterfly",
                category: StrategyCategory::Neutral,
                description: "Cheap bet on spot pinning the middle strike at expiry.",
                construction: "Buy call k1 + sell 2 calls at the middle + buy call k4",
                max_profit: "Wing width − net premium, at the middle strike",
                max_loss: "Net premium paid",
                breakeven: "Middle strike ± (wing width − premium)",
            },
        }
    }
}
