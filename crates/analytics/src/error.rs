use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Current month index {index} is out of bounds for a timeline of {len} months")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("An unexpected error occurred during KPI calculation: {0}")]
    InternalError(String),
}
