use crate::error::DecayError;
use core_types::MonthIndex;

/// The fixed valuation horizon the decay rate derivation is anchored to:
/// 70 years, in months.
pub const FULL_HORIZON_MONTHS: u32 = 70 * 12;

/// Default fraction of an event's value assumed to remain at the far end of
/// the full horizon.
pub const DEFAULT_RESIDUAL_RATE: f64 = 0.001;

/// Monthly decay rate of retail sales during the launch quarter.
const RETAIL_FAST_RATE: f64 = 0.35;
/// Monthly decay rate for months 3 through 8.
const RETAIL_MID_RATE: f64 = 0.15;
/// Starting monthly decay rate of the long tail.
const RETAIL_TAIL_RATE: f64 = 0.08;
/// The tail rate itself shrinks by this factor every 3 months.
const RETAIL_TAIL_SHRINK: f64 = 0.9;

/// Derives the exponential decay rate at which `residual_rate` of the value
/// remains after [`FULL_HORIZON_MONTHS`].
pub fn derived_decay_rate(residual_rate: f64) -> Result<f64, DecayError> {
    if !(residual_rate > 0.0 && residual_rate < 1.0) {
        return Err(DecayError::InvalidResidualRate(residual_rate));
    }
    Ok(-residual_rate.ln() / FULL_HORIZON_MONTHS as f64)
}

/// Spreads `value` over `start_month ..= horizon_end` along an exponential
/// decay curve, renormalized so the emitted series sums back to `value`.
///
/// When `decay_rate` is `None` it is derived from `residual_rate` via
/// [`derived_decay_rate`]. A non-positive `value` or an empty window yields an
/// empty series. Contributions are strictly decreasing.
pub fn distribute_exponential(
    value: f64,
    start_month: MonthIndex,
    horizon_end: MonthIndex,
    decay_rate: Option<f64>,
    residual_rate: f64,
) -> Result<Vec<(MonthIndex, f64)>, DecayError> {
    let rate = match decay_rate {
        Some(rate) if rate > 0.0 => rate,
        Some(rate) => return Err(DecayError::InvalidDecayRate(rate)),
        None => derived_decay_rate(residual_rate)?,
    };

    if value <= 0.0 {
        return Ok(Vec::new());
    }
    let span = horizon_end.offset_from(start_month) + 1;
    if span <= 0 {
        return Ok(Vec::new());
    }

    let raw: Vec<f64> = (0..span)
        .map(|t| value * (-rate * t as f64).exp())
        .collect();
    let total: f64 = raw.iter().sum();
    // With an extreme rate the unnormalized total can collapse to 0 or NaN;
    // there is nothing meaningful to renormalize then.
    if !total.is_finite() || total <= 0.0 {
        return Ok(Vec::new());
    }

    let scale = value / total;
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(t, contribution)| (start_month.plus(t as i32), contribution * scale))
        .collect())
}

/// Spreads a retail (physical sales) value over `start_month ..= horizon_end`
/// using a three-phase decay-rate schedule applied multiplicatively per month.
///
/// The emitted series is NOT renormalized: each month emits the running value
/// and the running value then decays by that month's rate, so the series total
/// diverges from `value`. This models a per-month realization rate for
/// physical sales rather than a split of `value` (see DESIGN.md).
pub fn distribute_piecewise_retail(
    value: f64,
    start_month: MonthIndex,
    horizon_end: MonthIndex,
) -> Vec<(MonthIndex, f64)> {
    if value <= 0.0 {
        return Vec::new();
    }
    let span = horizon_end.offset_from(start_month) + 1;
    if span <= 0 {
        return Vec::new();
    }

    let mut series = Vec::with_capacity(span as usize);
    let mut remaining = value;
    for t in 0..span {
        series.push((start_month.plus(t), remaining));
        remaining *= 1.0 - retail_rate_at(t);
    }
    series
}

/// The retail decay rate in effect at month offset `t`.
fn retail_rate_at(t: i32) -> f64 {
    if t < 3 {
        RETAIL_FAST_RATE
    } else if t < 9 {
        RETAIL_MID_RATE
    } else {
        let quarters = (t - 9) / 3;
        RETAIL_TAIL_RATE * RETAIL_TAIL_SHRINK.powi(quarters)
    }
}

/// Emits `value * exp(-decay_rate * i)` for each month offset `i` in
/// `[0, influence_months)`.
///
/// Deliberately not normalized: the series models the ongoing influence of an
/// event (concert, social post, appearance), not a split of its value.
pub fn distribute_event_influence(
    value: f64,
    start_month: MonthIndex,
    decay_rate: f64,
    influence_months: u32,
) -> Vec<(MonthIndex, f64)> {
    if value <= 0.0 || influence_months == 0 {
        return Vec::new();
    }
    (0..influence_months)
        .map(|i| {
            (
                start_month.plus(i as i32),
                value * (-decay_rate * f64::from(i)).exp(),
            )
        })
        .collect()
}

/// How many months an event influences, scaled linearly between `min_months`
/// and `max_months` by its value relative to the largest value in the batch.
///
/// A degenerate batch (no positive maximum) pins every event to `min_months`.
pub fn influence_months(value: f64, batch_max: f64, min_months: u32, max_months: u32) -> u32 {
    if batch_max <= 0.0 || value <= 0.0 || max_months <= min_months {
        return min_months;
    }
    let ratio = (value / batch_max).clamp(0.0, 1.0);
    let scaled = min_months as f64 + ratio * (max_months - min_months) as f64;
    (scaled.round() as u32).clamp(min_months, max_months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn month(year: i32, month: u32) -> MonthIndex {
        MonthIndex::from_date(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
    }

    #[test]
    fn exponential_series_sums_back_to_value() {
        let start = month(2022, 1);
        let series =
            distribute_exponential(250_000.0, start, start.plus(59), None, DEFAULT_RESIDUAL_RATE)
                .unwrap();
        assert_eq!(series.len(), 60);
        let total: f64 = series.iter().map(|(_, c)| c).sum();
        assert!((total - 250_000.0).abs() / 250_000.0 < 1e-6);
    }

    #[test]
    fn exponential_series_is_strictly_decreasing() {
        let start = month(2022, 1);
        let series =
            distribute_exponential(1_000.0, start, start.plus(23), Some(0.05), 0.001).unwrap();
        for window in series.windows(2) {
            assert!(window[1].1 < window[0].1);
        }
    }

    #[test]
    fn twelve_month_streaming_example() {
        // A single 120,000 streaming value with residual rate 0.01 over a
        // 12-month horizon: 12 contributions, summing to the full value,
        // strictly decreasing.
        let start = month(2023, 5);
        let series =
            distribute_exponential(120_000.0, start, start.plus(11), None, 0.01).unwrap();
        assert_eq!(series.len(), 12);
        let total: f64 = series.iter().map(|(_, c)| c).sum();
        assert!((total - 120_000.0).abs() / 120_000.0 < 1e-6);
        for window in series.windows(2) {
            assert!(window[1].1 < window[0].1);
        }
        assert_eq!(series[0].0, start);
        assert_eq!(series[11].0, start.plus(11));
    }

    #[test]
    fn zero_value_yields_empty_series() {
        let start = month(2022, 1);
        let series = distribute_exponential(0.0, start, start.plus(11), None, 0.001).unwrap();
        assert!(series.is_empty());
        assert!(distribute_piecewise_retail(0.0, start, start.plus(11)).is_empty());
        assert!(distribute_event_influence(0.0, start, 0.2, 6).is_empty());
    }

    #[test]
    fn inverted_window_yields_empty_series() {
        let start = month(2022, 6);
        let series = distribute_exponential(500.0, start, start.plus(-1), None, 0.001).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn rejects_bad_rates() {
        let start = month(2022, 1);
        assert_eq!(
            distribute_exponential(100.0, start, start.plus(5), None, 1.5),
            Err(DecayError::InvalidResidualRate(1.5))
        );
        assert_eq!(
            distribute_exponential(100.0, start, start.plus(5), Some(-0.1), 0.001),
            Err(DecayError::InvalidDecayRate(-0.1))
        );
    }

    #[test]
    fn retail_emits_full_value_first_then_decreases() {
        let start = month(2021, 10);
        let series = distribute_piecewise_retail(80_000.0, start, start.plus(23));
        assert_eq!(series.len(), 24);
        assert_eq!(series[0].1, 80_000.0);
        for window in series.windows(2) {
            assert!(window[1].1 < window[0].1);
        }
        // Not a renormalized split: the series total diverges from the value.
        let total: f64 = series.iter().map(|(_, c)| c).sum();
        assert!(total > 80_000.0);
    }

    #[test]
    fn retail_tail_rate_shrinks_every_quarter() {
        assert_eq!(retail_rate_at(0), RETAIL_FAST_RATE);
        assert_eq!(retail_rate_at(3), RETAIL_MID_RATE);
        assert_eq!(retail_rate_at(9), RETAIL_TAIL_RATE);
        assert!((retail_rate_at(12) - RETAIL_TAIL_RATE * 0.9).abs() < 1e-12);
        assert!((retail_rate_at(15) - RETAIL_TAIL_RATE * 0.81).abs() < 1e-12);
    }

    #[test]
    fn influence_follows_the_decay_curve_without_normalization() {
        let start = month(2023, 1);
        let series = distribute_event_influence(10_000.0, start, 0.25, 4);
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].1, 10_000.0);
        for (i, (m, contribution)) in series.iter().enumerate() {
            assert_eq!(*m, start.plus(i as i32));
            let expected = 10_000.0 * (-0.25 * i as f64).exp();
            assert!((contribution - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn influence_months_scales_with_batch_share() {
        assert_eq!(influence_months(0.0, 100.0, 3, 12), 3);
        assert_eq!(influence_months(100.0, 100.0, 3, 12), 12);
        assert_eq!(influence_months(50.0, 100.0, 3, 12), 8);
        // Degenerate batch maximum pins to the minimum.
        assert_eq!(influence_months(50.0, 0.0, 3, 12), 3);
    }
}
