use crate::error::RiskError;
use configuration::Investment;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Spectrum scaling when projected minimum revenue falls short of break-even.
const SHORTFALL_SPECTRUM_FACTOR: f64 = 0.2;
/// Spectrum scaling when projected minimum revenue covers break-even.
const COVERED_SPECTRUM_FACTOR: f64 = 0.3;
/// Width of each risk bucket, in percentage points.
const BUCKET_WIDTH_PCT: f64 = 20.0;

/// Label and description for each bucket, from lowest to highest risk.
const BUCKETS: [(&str, &str); 5] = [
    (
        "Very Low Risk",
        "Projected revenue comfortably clears the break-even point.",
    ),
    (
        "Low Risk",
        "Projected revenue clears the break-even point with a modest buffer.",
    ),
    (
        "Moderate Risk",
        "Projected revenue and the break-even point are closely matched.",
    ),
    (
        "High Risk",
        "Projected revenue falls well short of the break-even point.",
    ),
    (
        "Very High Risk",
        "Projected revenue is far below the break-even point.",
    ),
];

/// The validated terms of the offering a rating is computed against.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentTerms {
    goal_fund: Decimal,
    investor_share_ratio: Decimal,
}

impl InvestmentTerms {
    /// Creates validated `InvestmentTerms`.
    pub fn new(goal_fund: Decimal, investor_share_ratio: Decimal) -> Result<Self, RiskError> {
        if goal_fund <= dec!(0) {
            return Err(RiskError::InvalidParameters(
                "goal_fund must be greater than 0".to_string(),
            ));
        }
        if investor_share_ratio <= dec!(0) || investor_share_ratio > dec!(1) {
            return Err(RiskError::InvalidParameters(
                "investor_share_ratio must be within (0, 1]".to_string(),
            ));
        }
        Ok(Self {
            goal_fund,
            investor_share_ratio,
        })
    }

    /// Builds terms from the loaded configuration section.
    pub fn from_config(investment: &Investment) -> Result<Self, RiskError> {
        Self::new(investment.goal_fund, investment.investor_share_ratio)
    }

    /// The revenue at which investors are made whole.
    pub fn break_even(&self) -> Decimal {
        self.goal_fund / self.investor_share_ratio
    }
}

/// A discrete risk rating for display alongside the KPI report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskLevel {
    /// Bucket position, 0 (lowest risk) through 4 (highest).
    pub bucket_index: usize,
    pub percentage: f64,
    pub label: &'static str,
    pub description: &'static str,
}

/// Rates the offering against the KPI spectrum.
///
/// `min_revenue` is the spectrum's lower revenue bound (`spectrum_min`);
/// `spectrum` is the combined volatility coefficient.
pub fn classify(
    terms: &InvestmentTerms,
    spectrum: f64,
    min_revenue: f64,
) -> Result<RiskLevel, RiskError> {
    let break_even_exact = terms.break_even();
    let break_even = break_even_exact
        .to_f64()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or(RiskError::UnrepresentableBreakEven(break_even_exact))?;

    let difference = break_even - min_revenue;
    // The two branches scale the spectrum with different factors (0.2 vs
    // 0.3), preserved from the historical rating formula.
    let percentage = if difference > 0.0 {
        (difference / break_even + spectrum * SHORTFALL_SPECTRUM_FACTOR) * 100.0
    } else {
        spectrum * COVERED_SPECTRUM_FACTOR * 100.0
    };
    let percentage = percentage.max(0.0);

    let bucket_index = bucket_for(percentage);
    let (label, description) = BUCKETS[bucket_index];
    tracing::debug!(percentage, label, "classified investment risk");

    Ok(RiskLevel {
        bucket_index,
        percentage,
        label,
        description,
    })
}

/// The bucket a percentage falls into. Boundaries are lower-inclusive and the
/// last bucket is open-ended.
fn bucket_for(percentage: f64) -> usize {
    ((percentage / BUCKET_WIDTH_PCT).floor() as usize).min(BUCKETS.len() - 1)
}
