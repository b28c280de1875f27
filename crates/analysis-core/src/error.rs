use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
