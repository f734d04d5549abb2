//! # Encore Risk Classifier
//!
//! Maps the KPI outputs and the offering's investment terms to a discrete,
//! five-bucket risk rating.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It depends only on
//!   `configuration` for the investment terms.
//! - **Total classification:** every non-negative risk percentage resolves to
//!   exactly one bucket; the bucket boundaries at 20/40/60/80 are
//!   lower-inclusive.
//!
//! ## Public API
//!
//! - `InvestmentTerms`: validated goal fund and investor share ratio.
//! - `classify`: the classification entry point.
//! - `RiskLevel`: the resulting bucket, percentage, label, and description.
//! - `RiskError`: the specific error types that can be returned from this
//!   crate.

pub mod classifier;
pub mod error;

// Re-export the key components to create a clean, public-facing API.
pub use classifier::{classify, InvestmentTerms, RiskLevel};
pub use error::RiskError;
