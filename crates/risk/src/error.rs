use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Investment terms from configuration are invalid: {0}")]
    InvalidParameters(String),

    #[error("The break-even value ({0}) cannot be represented as a float")]
    UnrepresentableBreakEven(Decimal),
}
