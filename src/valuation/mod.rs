//! Valuation engine for single-company DCF runs

mod engine;
mod forecast;

pub use engine::{
    compute_valuation, derive_share_count, discount_factor, discount_series,
    forecast_free_cash_flows, terminal_value, ValuationEngine,
};
pub use forecast::{ForecastPeriod, ForecastRow, ValuationResult};

// ============================================================================
// Unit Scales
// ============================================================================
// Market cap and free cash flow are quoted in crores while market price is
// per share in rupees. The unit scale converts the aggregate figures to base
// currency units before dividing by a share count.

/// Rupees per crore
pub const UNIT_SCALE_CRORE: f64 = 1e7;
