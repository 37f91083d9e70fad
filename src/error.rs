//! Error types for loading inputs and running a valuation

use thiserror::Error;

use crate::input::InputField;

#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("Invalid assumption: {0}")]
    InvalidAssumption(String),

    /// Perpetuity growth formula needs discount_rate > terminal_growth_rate
    #[error(
        "Terminal value diverges: discount rate {discount_rate} must exceed terminal growth rate {terminal_growth_rate}"
    )]
    DivergentTerminalValue {
        discount_rate: f64,
        terminal_growth_rate: f64,
    },

    #[error("Missing input field: {0}")]
    MissingField(InputField),

    #[error("Malformed amount for {field}: {raw:?}")]
    MalformedAmount { field: InputField, raw: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ValuationError>;
