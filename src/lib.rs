//! DCF Valuation - intrinsic value estimates from free cash flow
//!
//! This library provides:
//! - Loading company financials (market price, free cash flow, market cap)
//! - Free cash flow forecasting under a constant growth assumption
//! - Perpetuity-growth terminal value and present value discounting
//! - Fair value per share and upside/downside versus market price
//! - CSV and plain-text reporting of the forecast table

pub mod error;
pub mod input;
pub mod assumptions;
pub mod valuation;
pub mod report;

// Re-export commonly used types
pub use error::{Result, ValuationError};
pub use input::{InputField, LoadedInput, ParseMode, ValuationInput};
pub use assumptions::Assumptions;
pub use valuation::{
    compute_valuation, ForecastPeriod, ForecastRow, ValuationEngine, ValuationResult,
    UNIT_SCALE_CRORE,
};
