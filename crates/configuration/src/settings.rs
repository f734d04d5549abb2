use crate::error::ConfigError;
use chrono::NaiveDate;
use core_types::StreamWeights;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The root configuration structure for a valuation run.
#[derive(Debug, Clone, Deserialize)]
pub struct ValuationConfig {
    pub investment: Investment,
    pub valuation: Valuation,
    /// Per-stream ledger weights. Omitted streams keep their default of 1.0.
    #[serde(default)]
    pub weights: StreamWeights,
    #[serde(default)]
    pub decay: DecayTuning,
}

/// The investment terms a risk rating is computed against.
#[derive(Debug, Clone, Deserialize)]
pub struct Investment {
    /// The funding goal of the offering, in the ledger currency.
    pub goal_fund: Decimal,
    /// The fraction of revenue paid out to investors (e.g., 0.4 for 40%).
    pub investor_share_ratio: Decimal,
}

/// Parameters framing the valuation window and the default decay behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct Valuation {
    /// Only albums released on or after this date count toward activity
    /// periods and release frequency.
    pub calculation_start_date: NaiveDate,
    /// The last month of the valuation timeline.
    pub horizon_end: NaiveDate,
    /// Fraction of an event's value assumed to remain after the full 70-year
    /// horizon; used to derive the exponential decay rate when no override is
    /// given.
    #[serde(default = "Valuation::default_residual_rate")]
    pub residual_rate: f64,
    /// Explicit exponential decay rate per month. Overrides the residual-rate
    /// derivation when set.
    #[serde(default)]
    pub decay_rate_override: Option<f64>,
}

impl Valuation {
    fn default_residual_rate() -> f64 {
        0.001
    }
}

/// Tuning constants for the influence-style distributions.
///
/// These are model parameters, not physical facts; they live here so a
/// recalibration never touches engine code.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DecayTuning {
    /// Per-month decay rate of a concert's influence.
    pub concert_decay_rate: f64,
    /// Per-month decay rate of a social post's influence.
    pub social_decay_rate: f64,
    /// Per-month decay rate of a management appearance's influence.
    pub appearance_decay_rate: f64,
    /// Smallest number of months any event influences.
    pub min_influence_months: u32,
    /// Largest number of months the biggest event in a batch influences.
    pub max_influence_months: u32,
}

impl Default for DecayTuning {
    fn default() -> Self {
        Self {
            concert_decay_rate: 0.12,
            social_decay_rate: 0.25,
            appearance_decay_rate: 0.15,
            min_influence_months: 3,
            max_influence_months: 12,
        }
    }
}

impl ValuationConfig {
    /// Checks that the loaded values are logically usable before any
    /// computation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.investment.goal_fund <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "investment.goal_fund must be greater than 0".to_string(),
            ));
        }
        if self.investment.investor_share_ratio <= Decimal::ZERO
            || self.investment.investor_share_ratio > Decimal::ONE
        {
            return Err(ConfigError::ValidationError(
                "investment.investor_share_ratio must be within (0, 1]".to_string(),
            ));
        }
        if self.valuation.residual_rate <= 0.0 || self.valuation.residual_rate >= 1.0 {
            return Err(ConfigError::ValidationError(
                "valuation.residual_rate must be within (0, 1)".to_string(),
            ));
        }
        if let Some(rate) = self.valuation.decay_rate_override {
            if rate <= 0.0 {
                return Err(ConfigError::ValidationError(
                    "valuation.decay_rate_override must be greater than 0".to_string(),
                ));
            }
        }
        if self.valuation.horizon_end < self.valuation.calculation_start_date {
            return Err(ConfigError::ValidationError(
                "valuation.horizon_end must not precede valuation.calculation_start_date"
                    .to_string(),
            ));
        }
        if self.decay.min_influence_months == 0
            || self.decay.min_influence_months > self.decay.max_influence_months
        {
            return Err(ConfigError::ValidationError(
                "decay.min_influence_months must be within [1, decay.max_influence_months]"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_config() -> ValuationConfig {
        ValuationConfig {
            investment: Investment {
                goal_fund: dec!(200_000_000),
                investor_share_ratio: dec!(0.4),
            },
            valuation: Valuation {
                calculation_start_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
                horizon_end: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
                residual_rate: 0.001,
                decay_rate_override: None,
            },
            weights: StreamWeights::default(),
            decay: DecayTuning::default(),
        }
    }

    #[test]
    fn accepts_a_sound_configuration() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_share_ratio_outside_unit_interval() {
        let mut config = base_config();
        config.investment.investor_share_ratio = dec!(1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_degenerate_residual_rate() {
        let mut config = base_config();
        config.valuation.residual_rate = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_influence_bounds() {
        let mut config = base_config();
        config.decay.min_influence_months = 20;
        config.decay.max_influence_months = 10;
        assert!(config.validate().is_err());
    }
}
