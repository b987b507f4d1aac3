//! Aggregate payoff curves over a spot-price grid.
//!
//! A [`PriceCurve`] is a derived projection: recomputed from scratch on every
//! parameter change, never mutated in place. Points are ordered by spot and
//! payoff is piecewise-linear between strikes at expiration, which is what
//! makes linear interpolation exact for breakeven detection.

use serde::{Deserialize, Serialize};

use crate::error::{self, StrategyError};
use crate::validate::validate_positive;

/// One sample of the aggregate payoff: (spot price, profit/loss).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Spot price at expiration (or the re-valuation spot in
    /// marked-to-market mode).
    pub spot: f64,
    /// Aggregate profit/loss of the strategy at that spot.
    pub payoff: f64,
}

/// Ordered sequence of (spot, payoff) samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCurve {
    points: Vec<CurvePoint>,
}

impl PriceCurve {
    /// Built by the composer from an already-validated grid.
    pub(crate) fn from_points(points: Vec<CurvePoint>) -> Self {
        Self { points }
    }

    /// The sampled points, ascending in spot.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the curve holds no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lowest sampled spot.
    pub fn spot_min(&self) -> Option<f64> {
        self.points.first().map(|p| p.spot)
    }

    /// Highest sampled spot.
    pub fn spot_max(&self) -> Option<f64> {
        self.points.last().map(|p| p.spot)
    }

    /// Payoff at an arbitrary spot inside the sampled domain, linearly
    /// interpolated between the bracketing samples.
    ///
    /// # Errors
    /// Returns [`StrategyError::InvalidInput`] when `spot` falls outside the
    /// sampled domain.
    pub fn payoff_at(&self, spot: f64) -> error::Result<f64> {
        let outside = || StrategyError::InvalidInput {
            message: format!("spot {spot} outside curve domain"),
        };
        let first = self.points.first().ok_or_else(outside)?;
        let last = self.points.last().ok_or_else(outside)?;
        if spot < first.spot || spot > last.spot {
            return Err(outside());
        }
        for w in self.points.windows(2) {
            let (a, b) = (w[0], w[1]);
            if spot <= b.spot {
                let t = (spot - a.spot) / (b.spot - a.spot);
                return Ok(a.payoff + t * (b.payoff - a.payoff));
            }
        }
        Ok(last.payoff)
    }

    /// Iterate over the samples.
    pub fn iter(&self) -> impl Iterator<Item = &CurvePoint> {
        self.points.iter()
    }
}

/// Evenly-spaced spot grid over `[lo, hi]` with `steps` points.
///
/// # Errors
/// Returns [`StrategyError::InvalidInput`] unless `0 < lo < hi` and
/// `steps ≥ 2`.
pub fn spot_grid(lo: f64, hi: f64, steps: usize) -> error::Result<Vec<f64>> {
    validate_positive(lo, "grid low")?;
    validate_positive(hi, "grid high")?;
    if hi <= lo {
        return Err(StrategyError::InvalidInput {
            message: format!("grid high {hi} must exceed grid low {lo}"),
        });
    }
    if steps < 2 {
        return Err(StrategyError::InvalidInput {
            message: format!("grid needs at least 2 steps, got {steps}"),
        });
    }
    let span = hi - lo;
    let last = steps - 1;
    Ok((0..steps)
        .map(|i| lo + span * (i as f64 / last as f64))
        .collect())
}

/// Default charting grid: ±40% around spot, 200 points.
///
/// Wide enough to bracket the strikes typical strategies place within ±30%
/// of spot; callers with wider wings should build their own grid via
/// [`spot_grid`].
pub fn default_grid(spot: f64) -> error::Result<Vec<f64>> {
    validate_positive(spot, "spot")?;
    spot_grid(spot * 0.6, spot * 1.4, 200)
}
