//! # Encore Future Valuation Predictor
//!
//! Predicts the value of a hypothetical, not-yet-occurred event from the
//! artist's history: a regression over track counts for album releases, a
//! one-hot category regression for management appearances, and median-based
//! comparables for concerts and media content. Predictions are bounded by the
//! artist's historical revenue volatility.
//!
//! ## Architectural Principles
//!
//! - **Models are values:** `train` returns an owned, immutable model that is
//!   passed explicitly into `predict`. Nothing is cached in process-wide
//!   state, so predictions for different artists can never contaminate each
//!   other.
//! - **Fail fast on thin history:** fitting against fewer than two usable
//!   samples returns `ForecastError::InsufficientData` instead of a
//!   meaningless model.
//!
//! ## Public API
//!
//! - `AlbumValueModel` / `AppearanceValueModel`: trainable regressors.
//! - `predict_concert_value` / `predict_media_value`: median comparables.
//! - `bound_prediction` / `PredictionResult`: volatility bounding.
//! - `ForecastError`: the specific error types that can be returned from this
//!   crate.

pub mod comparable;
pub mod error;
pub mod regression;

// Re-export the key components to create a clean, public-facing API.
pub use comparable::{
    bound_prediction, predict_concert_value, predict_media_value, PredictionResult,
};
pub use error::ForecastError;
pub use regression::{
    AlbumObservation, AlbumValueModel, AppearanceObservation, AppearanceValueModel,
};
