use crate::error::AnalyticsError;
use crate::report::{KpiReport, RevenueSpectrum};
use chrono::{Datelike, NaiveDate};
use core_types::{MonthIndex, RevenueStream};
use std::collections::{BTreeMap, BTreeSet};
use timeline::{ParsedAlbum, Timeline};

/// How many months after a release the artist counts as actively promoting.
const ACTIVITY_WINDOW_MONTHS: i32 = 3;
/// Bounds of the effective active window the expected-revenue integral runs
/// over. Higher volatility compresses the window toward the minimum.
const MIN_EFFECTIVE_WINDOW_MONTHS: f64 = 1.0;
const MAX_EFFECTIVE_WINDOW_MONTHS: f64 = 3.0;
/// Weight of the per-album dispersion within the combined spectrum.
const ALBUM_SPECTRUM_WEIGHT: f64 = 0.2;

/// The calculation settings the KPI pass needs beyond the ledger itself.
#[derive(Debug, Clone, Copy)]
pub struct KpiParams {
    /// Only albums released on or after this date count toward activity
    /// periods and release frequency.
    pub calculation_start_date: NaiveDate,
    /// Monthly exponential decay rate used by the expected-revenue integral.
    pub decay_rate: f64,
}

/// A stateless calculator for deriving valuation KPIs from a frozen ledger.
#[derive(Debug, Default)]
pub struct KpiEngine {}

/// Intermediate activity-period figures shared by the spectrum and
/// expected-revenue passes.
struct ActivitySummary {
    active_revenue_avg: f64,
    activity_frequency: f64,
    /// Summed active revenue per calendar year, in year order.
    yearly_sums: Vec<f64>,
}

impl KpiEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating valuation KPIs.
    ///
    /// # Arguments
    ///
    /// * `timeline` - The frozen valuation ledger.
    /// * `current_index` - The position of the "current" month; only months up
    ///   to and including it are scanned.
    /// * `albums` - The validated album list from aggregation.
    /// * `params` - Calculation start date and decay rate.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `KpiReport` or an `AnalyticsError`. Degenerate
    /// statistical inputs produce neutral defaults, not errors.
    pub fn calculate(
        &self,
        timeline: &Timeline,
        current_index: usize,
        albums: &[ParsedAlbum],
        params: &KpiParams,
    ) -> Result<KpiReport, AnalyticsError> {
        if current_index >= timeline.len() {
            return Err(AnalyticsError::IndexOutOfBounds {
                index: current_index,
                len: timeline.len(),
            });
        }

        let mut report = KpiReport::new();
        self.scan_peak_and_totals(timeline, current_index, &mut report);

        let activity = self.detect_activity(timeline, current_index, albums, params);
        self.calculate_spectrum(&activity, albums, &mut report);
        self.calculate_expected_revenue(&activity, params, &mut report);

        report.normalized_diversity_index = diversity_index(&report.stream_totals);

        Ok(report)
    }

    /// Walks `[0, current_index]` once, tracking the peak MOV, the running
    /// per-stream totals, and the dominant stream (ties broken by first-seen).
    fn scan_peak_and_totals(
        &self,
        timeline: &Timeline,
        current_index: usize,
        report: &mut KpiReport,
    ) {
        let mut best_total = 0.0_f64;
        for offset in 0..=current_index {
            let Some(month) = timeline.get(offset) else {
                continue;
            };

            if month.mov > report.peak_value {
                report.peak_value = month.mov;
                report.peak_date = Some(month.month_end);
            }
            report.cumulative_value += month.mov;

            for stream in RevenueStream::ALL {
                report.stream_totals[stream.index()] += month.stream_total(stream);
            }
            for stream in RevenueStream::ALL {
                let total = report.stream_totals[stream.index()];
                if total > best_total {
                    best_total = total;
                    report.dominant_stream = Some(stream);
                }
            }
        }

        if let Some(month) = timeline.get(current_index) {
            report.current_value = month.mov;
        }
    }

    /// Finds the months falling inside an album's promotion window and
    /// summarizes their revenue per calendar year.
    fn detect_activity(
        &self,
        timeline: &Timeline,
        current_index: usize,
        albums: &[ParsedAlbum],
        params: &KpiParams,
    ) -> ActivitySummary {
        let considered: Vec<&ParsedAlbum> = albums
            .iter()
            .filter(|a| a.release_date >= params.calculation_start_date)
            .collect();
        let release_months: Vec<MonthIndex> = considered
            .iter()
            .map(|a| MonthIndex::from_date(a.release_date))
            .collect();

        let mut yearly: BTreeMap<i32, f64> = BTreeMap::new();
        let mut revenue_sum = 0.0;
        let mut active_count = 0usize;
        for offset in 0..=current_index {
            let Some(month) = timeline.get(offset) else {
                continue;
            };
            let month_index = timeline.start().plus(offset as i32);
            let active = release_months.iter().any(|release| {
                let distance = month_index.offset_from(*release);
                (0..=ACTIVITY_WINDOW_MONTHS).contains(&distance)
            });
            if active {
                revenue_sum += month.mov;
                active_count += 1;
                *yearly.entry(month.month_end.year()).or_insert(0.0) += month.mov;
            }
        }

        let active_revenue_avg = if active_count > 0 {
            revenue_sum / active_count as f64
        } else {
            0.0
        };

        let release_years: BTreeSet<i32> =
            considered.iter().map(|a| a.release_date.year()).collect();
        let activity_frequency = if considered.is_empty() {
            1.0
        } else {
            considered.len() as f64 / release_years.len() as f64
        };

        ActivitySummary {
            active_revenue_avg,
            activity_frequency,
            yearly_sums: yearly.into_values().collect(),
        }
    }

    /// Derives the volatility spectrum from the yearly active-revenue samples
    /// and the per-album value dispersion.
    fn calculate_spectrum(
        &self,
        activity: &ActivitySummary,
        albums: &[ParsedAlbum],
        report: &mut KpiReport,
    ) {
        let samples = &activity.yearly_sums;
        if samples.is_empty() {
            return;
        }

        let mut sorted = samples.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = sample_mean(&sorted);
        let std = population_std(&sorted, mean);
        let mov_spectrum = if mean > 0.0 { std / mean } else { 0.0 };

        let album_values: Vec<f64> = albums.iter().map(|a| a.total_value()).collect();
        let album_mean = sample_mean(&album_values);
        let album_std = population_std(&album_values, album_mean);
        let album_spectrum = if album_mean > 0.0 {
            album_std / album_mean
        } else {
            0.0
        };

        let spectrum = mov_spectrum + ALBUM_SPECTRUM_WEIGHT * album_spectrum;
        report.spectrum = RevenueSpectrum {
            mean,
            std,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            spectrum,
            spectrum_min: mean * (1.0 - spectrum),
            spectrum_max: mean * (1.0 + spectrum),
        };
    }

    /// Annualizes the average active revenue through the exponential-decay
    /// integral over the volatility-compressed effective window.
    fn calculate_expected_revenue(
        &self,
        activity: &ActivitySummary,
        params: &KpiParams,
        report: &mut KpiReport,
    ) {
        report.active_revenue_avg = activity.active_revenue_avg;
        report.activity_frequency = activity.activity_frequency;

        let avg = activity.active_revenue_avg;
        if avg <= 0.0 {
            return;
        }

        let window = (MAX_EFFECTIVE_WINDOW_MONTHS / (1.0 + report.spectrum.spectrum))
            .clamp(MIN_EFFECTIVE_WINDOW_MONTHS, MAX_EFFECTIVE_WINDOW_MONTHS);
        let rate = params.decay_rate;
        let window_value = if rate.abs() < 1e-9 {
            avg * window
        } else {
            avg * (1.0 - (-rate * window).exp()) / rate
        };

        report.expected_annual_revenue = window_value * activity.activity_frequency;
    }
}

/// Normalized Shannon entropy over the positive stream totals.
///
/// Returns 0.0 when fewer than two streams carry value, 1.0 when the positive
/// streams are perfectly balanced.
fn diversity_index(stream_totals: &[f64; RevenueStream::COUNT]) -> f64 {
    let positive: Vec<f64> = stream_totals.iter().copied().filter(|v| *v > 0.0).collect();
    if positive.len() <= 1 {
        return 0.0;
    }
    let total: f64 = positive.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let entropy: f64 = positive
        .iter()
        .map(|v| {
            let p = v / total;
            -p * p.ln()
        })
        .sum();
    (entropy / (positive.len() as f64).ln()).clamp(0.0, 1.0)
}

fn sample_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (denominator `n`). A single sample has no
/// dispersion.
fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Linear-interpolated quantile of an already-sorted sample.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            if lower == upper {
                sorted[lower]
            } else {
                sorted[lower] + (pos - lower as f64) * (sorted[upper] - sorted[lower])
            }
        }
    }
}
