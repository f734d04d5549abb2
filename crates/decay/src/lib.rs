//! # Encore Decay Distribution Engine
//!
//! Pure functions that spread a one-time event value across the months that
//! follow it. Every valuation ledger entry in the system originates from one
//! of the three distributions in this crate.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   events, ledgers, or configuration files. It depends only on `core-types`.
//! - **Stateless Calculation:** Each distribution is a function from a scalar
//!   value and a month window to a series of `(month, contribution)` pairs.
//!   Identical inputs always produce identical output.
//!
//! ## The three distributions
//!
//! - [`distribute_exponential`]: renormalized exponential decay. The emitted
//!   window always sums back to the original value; used for value splits
//!   (album streaming and popularity).
//! - [`distribute_piecewise_retail`]: three-phase physical-sales schedule.
//!   Deliberately not renormalized; the series is a per-month realization
//!   rate, not a split.
//! - [`distribute_event_influence`]: plain exponential tail over a bounded
//!   influence window. Deliberately not normalized; models ongoing influence
//!   of concerts, social posts, and appearances.

pub mod distribution;
pub mod error;

// Re-export the key components to create a clean, public-facing API.
pub use distribution::{
    derived_decay_rate, distribute_event_influence, distribute_exponential,
    distribute_piecewise_retail, influence_months, DEFAULT_RESIDUAL_RATE, FULL_HORIZON_MONTHS,
};
pub use error::DecayError;
