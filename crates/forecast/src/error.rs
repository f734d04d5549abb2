use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Not enough historical data to forecast: needed {needed} samples, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Historical track counts are all identical; cannot fit a trend")]
    DegenerateFeatures,

    #[error("Model training failed: {0}")]
    Training(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),
}
