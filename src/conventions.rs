//! Market conventions for quoting time, theta, and vega.
//!
//! Sensitivities come out of the closed form in annualized / per-unit-vol
//! terms; retail-facing convention rescales theta to value decay per calendar
//! day and vega to value change per one percentage-point move in implied
//! volatility. The rescaling lives here so it is applied in exactly one
//! place.

/// Calendar days per year used for day-count and theta scaling.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Convert integer days to expiry into a year fraction.
pub fn year_fraction(days: u32) -> f64 {
    f64::from(days) / DAYS_PER_YEAR
}

/// Discount factor e^(−rT) for a flat continuously-compounded rate.
pub fn discount_factor(rate: f64, expiry: f64) -> f64 {
    (-rate * expiry).exp()
}

/// Rescale an annualized theta to value decay per calendar day.
pub fn per_calendar_day(annual_theta: f64) -> f64 {
    annual_theta / DAYS_PER_YEAR
}

/// Rescale a raw vega (per unit vol) to value per one percentage-point vol move.
pub fn per_vol_point(raw_vega: f64) -> f64 {
    raw_vega / 100.0
}
