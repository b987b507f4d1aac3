//! Closed-form single-option valuation and sensitivities.
//!
//! One entry point, [`price_and_greeks`], returns an [`OptionQuote`] holding
//! fair value plus delta, gamma, theta, and vega. Degenerate inputs
//! (near-zero expiry or volatility) collapse to intrinsic-value limits
//! explicitly instead of flowing through the `σ√T` division.

pub mod black_scholes;

pub use black_scholes::{price_and_greeks, Greeks, OptionQuote, MIN_EXPIRY, MIN_VOL};

pub(crate) use black_scholes::QuoteCache;
