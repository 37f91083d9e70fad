//! Valuation inputs and company financials loading

pub mod loader;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use loader::{
    load_financials, load_financials_from_reader, parse_amount, FinancialsDocument,
};

/// The three company figures a valuation run needs.
///
/// Free cash flow and market cap share one unit (crores in the source data);
/// market price is per share in base currency units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValuationInput {
    /// Current market price per share
    pub market_price: f64,

    /// Free cash flow for the most recent fiscal year
    pub free_cash_flow: f64,

    /// Market capitalization
    pub market_cap: f64,
}

impl ValuationInput {
    pub fn new(market_price: f64, free_cash_flow: f64, market_cap: f64) -> Self {
        Self {
            market_price,
            free_cash_flow,
            market_cap,
        }
    }
}

/// Identifies one of the input figures, for error and warning messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    MarketPrice,
    FreeCashFlow,
    MarketCap,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::MarketPrice => "current market price",
            InputField::FreeCashFlow => "free cash flow",
            InputField::MarketCap => "market capitalization",
        };
        f.write_str(name)
    }
}

/// How the loader treats missing or unparseable amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Substitute zero and record the field in `LoadedInput::defaulted`
    #[default]
    Lenient,
    /// Fail with `MissingField` / `MalformedAmount`
    Strict,
}

/// Loader output: the parsed input plus any fields that fell back to zero
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LoadedInput {
    pub input: ValuationInput,
    pub defaulted: Vec<InputField>,
}

impl LoadedInput {
    /// True when every figure came from the document
    pub fn is_complete(&self) -> bool {
        self.defaulted.is_empty()
    }
}
