//! # Encore KPI Engine
//!
//! This crate derives summary analytics from a valuation timeline: peak value,
//! revenue mix, activity frequency, volatility spectrum, expected annual
//! revenue, and the revenue diversity index. It acts as the "unbiased judge"
//! of an artist's valuation history.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` and `timeline`.
//! - **Stateless Calculation:** The `KpiEngine` is a stateless calculator. It
//!   takes the frozen ledger as input and produces a `KpiReport` as output.
//!   Degenerate inputs (no albums, zero means, single samples) produce neutral
//!   defaults instead of errors, because the report must always be complete
//!   for display.
//!
//! ## Public API
//!
//! - `KpiEngine`: the main struct that contains the calculation logic.
//! - `KpiReport` / `RevenueSpectrum`: the standardized result structs.
//! - `KpiParams`: the calculation settings (start date, decay rate).
//! - `AnalyticsError`: the specific error types that can be returned from
//!   this crate.

pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{KpiEngine, KpiParams};
pub use error::AnalyticsError;
pub use report::{KpiReport, RevenueSpectrum};
