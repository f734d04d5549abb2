use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecayError {
    #[error("Residual rate {0} is outside the open interval (0, 1)")]
    InvalidResidualRate(f64),

    #[error("Decay rate {0} must be greater than 0")]
    InvalidDecayRate(f64),
}
