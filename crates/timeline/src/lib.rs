//! # Encore Timeline Aggregator
//!
//! This crate builds the monthly valuation ledger. It consumes all five event
//! categories for one artist, invokes the decay engine per event, and
//! accumulates the weighted contributions into a month-indexed `Timeline`.
//!
//! ## Architectural Principles
//!
//! - **Build then freeze:** the ledger is assembled through an explicit
//!   `TimelineBuilder` and returned as an immutable `Timeline`. Monthly
//!   overall value (MOV) is recomputed once at build time from the per-stream
//!   totals, never mutated directly.
//! - **No silent corruption:** event records with unparseable dates are
//!   skipped, and each skip is reported back to the caller as a
//!   `SkippedEvent` rather than only logged.
//!
//! ## Public API
//!
//! - `aggregate`: the main entry point, dataset + configuration in,
//!   `AggregationOutcome` out.
//! - `Timeline`, `TimelineMonth`, `AlbumSnapshot`: the frozen ledger.
//! - `TimelineBuilder`: the arena the aggregator writes into.
//! - `TimelineError`: the specific error types that can be returned from this
//!   crate.

pub mod aggregator;
pub mod error;
pub mod ledger;

// Re-export the key components to create a clean, public-facing API.
pub use aggregator::{aggregate, AggregationOutcome, ParsedAlbum, SkippedEvent};
pub use error::TimelineError;
pub use ledger::{AlbumSnapshot, Timeline, TimelineBuilder, TimelineMonth};
