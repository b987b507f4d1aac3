//! # optstrat
//!
//! Option strategy analytics for payoff teaching tools and dashboards.
//!
//! Provides the full pipeline: market parameters + leg specifications →
//! closed-form pricing per leg → aggregate payoff curve, portfolio greeks,
//! and net cost → breakeven detection and scenario (shock) analysis.
//!
//! ## Architecture
//!
//! - **`pricing`** — Black-Scholes valuation and greeks for one option
//! - **`strategy`** — legs, declarative strategy templates, composition
//! - **`breakeven`** — zero-crossings of a composed payoff curve
//! - **`scenario`** — time-decay / spot / vol shock evaluation
//!
//! ## Design
//!
//! - **No panics.** Every fallible operation returns [`Result`]. Library
//!   code never calls `unwrap()` or `expect()`.
//! - **Pure and stateless.** All computations are projections of immutable
//!   inputs; curves and greeks are recomputed from scratch, never mutated.
//!   Identical inputs produce bit-for-bit identical outputs.
//! - **Degenerate inputs are policies, not errors.** Near-zero expiry or
//!   volatility collapses to intrinsic-value limits explicitly; invalid
//!   inputs (non-positive spot or strike, unordered strikes) fail loudly.
//! - **Thread-safe.** No shared mutable state anywhere; everything is
//!   `Send + Sync` and safe to evaluate concurrently.
//! - **Serializable.** All value types implement Serde
//!   `Serialize` / `Deserialize` with validation on deserialization where
//!   invariants exist ([`MarketState`], [`strategy::Leg`]).

pub mod breakeven;
pub mod conventions;
pub mod curve;
pub mod error;
pub mod market;
pub mod pricing;
pub mod scenario;
pub mod strategy;
pub mod types;
mod validate;

#[doc(inline)]
pub use breakeven::find_breakevens;
#[doc(inline)]
pub use curve::PriceCurve;
#[doc(inline)]
pub use error::{Result, StrategyError};
#[doc(inline)]
pub use market::MarketState;
#[doc(inline)]
pub use pricing::{price_and_greeks, Greeks, OptionQuote};
#[doc(inline)]
pub use scenario::Scenario;
#[doc(inline)]
pub use strategy::{compose, Composition, Leg, StrategyKind};
#[doc(inline)]
pub use types::{Direction, NetCost, OptionType};
