use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum CoreError {
    #[error("Invalid event date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },
}
