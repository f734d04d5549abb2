use crate::error::ForecastError;
use core_types::AppearanceCategory;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};

/// Minimum number of historical samples any regression is fitted against.
const MIN_TRAINING_SAMPLES: usize = 2;

/// How strongly each appearance category converts a fitted per-appearance
/// value into a booked one.
fn category_weight(category: AppearanceCategory) -> f64 {
    match category {
        AppearanceCategory::Broadcast => 1.0,
        AppearanceCategory::Variety => 1.2,
        AppearanceCategory::Radio => 0.8,
        AppearanceCategory::Festival => 1.1,
    }
}

/// One historical album: its track count and total realized value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlbumObservation {
    pub track_count: u32,
    pub total_value: f64,
}

/// One historical appearance: its category and per-appearance value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppearanceObservation {
    pub category: AppearanceCategory,
    pub value: f64,
}

/// A regression from album track count to expected total album value.
///
/// Returned by `train` as an owned value and passed explicitly into
/// `predict`; no model is ever shared across artists or calls.
pub struct AlbumValueModel {
    model: LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>,
}

impl AlbumValueModel {
    /// Fits the model against the historical albums.
    pub fn train(history: &[AlbumObservation]) -> Result<Self, ForecastError> {
        if history.len() < MIN_TRAINING_SAMPLES {
            return Err(ForecastError::InsufficientData {
                needed: MIN_TRAINING_SAMPLES,
                got: history.len(),
            });
        }
        let first = history[0].track_count;
        if history.iter().all(|o| o.track_count == first) {
            return Err(ForecastError::DegenerateFeatures);
        }

        let features: Vec<f64> = history.iter().map(|o| f64::from(o.track_count)).collect();
        let targets: Vec<f64> = history.iter().map(|o| o.total_value).collect();
        let x = DenseMatrix::new(history.len(), 1, features, false)
            .map_err(|e| ForecastError::Training(e.to_string()))?;

        let model = LinearRegression::fit(&x, &targets, LinearRegressionParameters::default())
            .map_err(|e| ForecastError::Training(e.to_string()))?;
        tracing::debug!(samples = history.len(), "trained album value model");
        Ok(Self { model })
    }

    /// Predicts the total value of a hypothetical release with the given
    /// track count. Negative fitted values are floored at zero.
    pub fn predict(&self, track_count: u32) -> Result<f64, ForecastError> {
        let x = DenseMatrix::new(1, 1, vec![f64::from(track_count)], false)
            .map_err(|e| ForecastError::Prediction(e.to_string()))?;
        let predicted = self
            .model
            .predict(&x)
            .map_err(|e| ForecastError::Prediction(e.to_string()))?;
        Ok(predicted[0].max(0.0))
    }
}

/// A regression from one-hot appearance category to per-appearance value.
pub struct AppearanceValueModel {
    model: LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>,
}

impl AppearanceValueModel {
    /// Fits the model against the historical appearances.
    pub fn train(history: &[AppearanceObservation]) -> Result<Self, ForecastError> {
        if history.len() < MIN_TRAINING_SAMPLES {
            return Err(ForecastError::InsufficientData {
                needed: MIN_TRAINING_SAMPLES,
                got: history.len(),
            });
        }

        let mut features = Vec::with_capacity(history.len() * AppearanceCategory::COUNT);
        for observation in history {
            features.extend_from_slice(&one_hot(observation.category));
        }
        let targets: Vec<f64> = history.iter().map(|o| o.value).collect();
        let x = DenseMatrix::new(history.len(), AppearanceCategory::COUNT, features, false)
            .map_err(|e| ForecastError::Training(e.to_string()))?;

        let model = LinearRegression::fit(&x, &targets, LinearRegressionParameters::default())
            .map_err(|e| ForecastError::Training(e.to_string()))?;
        tracing::debug!(samples = history.len(), "trained appearance value model");
        Ok(Self { model })
    }

    /// Predicts the booked value of `occurrence_count` hypothetical
    /// appearances of the given category.
    pub fn predict(
        &self,
        category: AppearanceCategory,
        occurrence_count: u32,
    ) -> Result<f64, ForecastError> {
        let x = DenseMatrix::new(1, AppearanceCategory::COUNT, one_hot(category).to_vec(), false)
            .map_err(|e| ForecastError::Prediction(e.to_string()))?;
        let predicted = self
            .model
            .predict(&x)
            .map_err(|e| ForecastError::Prediction(e.to_string()))?;
        let per_appearance = predicted[0].max(0.0);
        Ok(per_appearance * category_weight(category) * f64::from(occurrence_count))
    }
}

fn one_hot(category: AppearanceCategory) -> [f64; AppearanceCategory::COUNT] {
    let mut row = [0.0; AppearanceCategory::COUNT];
    row[category.index()] = 1.0;
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_model_recovers_a_linear_relationship() {
        let history = [
            AlbumObservation { track_count: 8, total_value: 80_000.0 },
            AlbumObservation { track_count: 10, total_value: 100_000.0 },
            AlbumObservation { track_count: 12, total_value: 120_000.0 },
        ];
        let model = AlbumValueModel::train(&history).unwrap();
        let predicted = model.predict(11).unwrap();
        assert!((predicted - 110_000.0).abs() / 110_000.0 < 1e-6);
    }

    #[test]
    fn album_model_rejects_thin_history() {
        let one = [AlbumObservation { track_count: 10, total_value: 100_000.0 }];
        assert!(matches!(
            AlbumValueModel::train(&one),
            Err(ForecastError::InsufficientData { needed: 2, got: 1 })
        ));
    }

    #[test]
    fn album_model_rejects_identical_track_counts() {
        let flat = [
            AlbumObservation { track_count: 10, total_value: 90_000.0 },
            AlbumObservation { track_count: 10, total_value: 110_000.0 },
        ];
        assert!(matches!(
            AlbumValueModel::train(&flat),
            Err(ForecastError::DegenerateFeatures)
        ));
    }

    #[test]
    fn appearance_model_reproduces_seen_category_values() {
        let history = [
            AppearanceObservation { category: AppearanceCategory::Broadcast, value: 100.0 },
            AppearanceObservation { category: AppearanceCategory::Broadcast, value: 100.0 },
            AppearanceObservation { category: AppearanceCategory::Variety, value: 200.0 },
            AppearanceObservation { category: AppearanceCategory::Variety, value: 200.0 },
        ];
        let model = AppearanceValueModel::train(&history).unwrap();

        // Broadcast carries weight 1.0: two appearances at the fitted 100.
        let broadcast = model.predict(AppearanceCategory::Broadcast, 2).unwrap();
        assert!((broadcast - 200.0).abs() < 1e-6);

        // Variety carries weight 1.2: one appearance at the fitted 200.
        let variety = model.predict(AppearanceCategory::Variety, 1).unwrap();
        assert!((variety - 240.0).abs() < 1e-6);
    }

    #[test]
    fn appearance_model_rejects_thin_history() {
        let one = [AppearanceObservation {
            category: AppearanceCategory::Radio,
            value: 50.0,
        }];
        assert!(matches!(
            AppearanceValueModel::train(&one),
            Err(ForecastError::InsufficientData { .. })
        ));
    }
}
