use chrono::NaiveDate;
use core_types::RevenueStream;
use serde::Serialize;

/// The volatility spectrum of an artist's active revenue.
///
/// The base statistics describe the yearly active-revenue samples; `spectrum`
/// combines their dispersion with the dispersion of per-album values, and the
/// min/max bounds project the mean through that combined volatility.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RevenueSpectrum {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Combined coefficient of variation: monthly dispersion plus 0.2 times
    /// the per-album dispersion.
    pub spectrum: f64,
    pub spectrum_min: f64,
    pub spectrum_max: f64,
}

/// A comprehensive, standardized report of an artist's valuation KPIs.
///
/// This struct is the final output of the `KpiEngine` and serves as the data
/// transfer object for valuation results throughout the entire system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    // I. Peak and current state
    pub peak_value: f64,
    pub peak_date: Option<NaiveDate>,
    pub current_value: f64,

    // II. Revenue mix
    pub stream_totals: [f64; RevenueStream::COUNT],
    pub dominant_stream: Option<RevenueStream>,
    pub cumulative_value: f64,
    pub normalized_diversity_index: f64,

    // III. Activity and forecast inputs
    pub active_revenue_avg: f64,
    pub activity_frequency: f64,
    pub expected_annual_revenue: f64,
    pub spectrum: RevenueSpectrum,
}

impl KpiReport {
    /// Creates a new, zeroed-out KpiReport.
    /// This is useful as a default or starting point before calculations.
    pub fn new() -> Self {
        Self {
            peak_value: 0.0,
            peak_date: None,
            current_value: 0.0,
            stream_totals: [0.0; RevenueStream::COUNT],
            dominant_stream: None,
            cumulative_value: 0.0,
            normalized_diversity_index: 0.0,
            active_revenue_avg: 0.0,
            activity_frequency: 1.0,
            expected_annual_revenue: 0.0,
            spectrum: RevenueSpectrum::default(),
        }
    }

    /// The cumulative total for one revenue stream over the scanned range.
    pub fn stream_total(&self, stream: RevenueStream) -> f64 {
        self.stream_totals[stream.index()]
    }

    /// The wire label of the dominant stream, for display payloads.
    pub fn dominant_stream_label(&self) -> Option<&'static str> {
        self.dominant_stream.map(|s| s.label())
    }
}

impl Default for KpiReport {
    fn default() -> Self {
        Self::new()
    }
}
