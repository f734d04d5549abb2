use crate::error::ForecastError;
use serde::Serialize;

/// A bounded forecast for one hypothetical event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predicted_value: f64,
    pub min_expected_revenue: f64,
    pub max_expected_revenue: f64,
}

/// Predicts the gross value of `occurrence_count` hypothetical concerts as
/// the median historical per-event gross times the count.
pub fn predict_concert_value(
    historical_gross: &[f64],
    occurrence_count: u32,
) -> Result<f64, ForecastError> {
    Ok(median(historical_gross)? * f64::from(occurrence_count))
}

/// Predicts the engagement value of `planned_videos` hypothetical videos as
/// the median historical per-video value times the count.
pub fn predict_media_value(
    per_video_values: &[f64],
    planned_videos: u32,
) -> Result<f64, ForecastError> {
    Ok(median(per_video_values)? * f64::from(planned_videos))
}

/// Bounds a prediction by the artist's historical revenue volatility.
///
/// The volatility factor is the active-revenue standard deviation over the
/// active-revenue average; a degenerate average collapses the bounds onto the
/// prediction itself.
pub fn bound_prediction(
    predicted_value: f64,
    revenue_std: f64,
    active_revenue_avg: f64,
) -> PredictionResult {
    let volatility_factor = if active_revenue_avg > 0.0 {
        revenue_std / active_revenue_avg
    } else {
        0.0
    };
    PredictionResult {
        predicted_value,
        min_expected_revenue: predicted_value * (1.0 - volatility_factor),
        max_expected_revenue: predicted_value * (1.0 + volatility_factor),
    }
}

/// Median with linear interpolation between the two middle samples.
fn median(values: &[f64]) -> Result<f64, ForecastError> {
    if values.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}
