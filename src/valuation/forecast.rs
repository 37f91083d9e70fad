//! Forecast table rows and valuation results

use serde::{Serialize, Serializer};
use std::fmt;

/// Label of a forecast table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastPeriod {
    /// Explicit forecast year, 1-based
    Year(u32),
    /// Perpetuity beyond the horizon
    Terminal,
}

impl fmt::Display for ForecastPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastPeriod::Year(n) => write!(f, "Year {}", n),
            ForecastPeriod::Terminal => f.write_str("Terminal"),
        }
    }
}

impl Serialize for ForecastPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of the forecast table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastRow {
    #[serde(rename = "year")]
    pub period: ForecastPeriod,
    pub projected_fcf: f64,
    pub discounted_fcf: f64,
}

/// Output of a single valuation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResult {
    /// Sum of discounted forecast cash flows and discounted terminal value
    pub enterprise_value: f64,

    /// Same as enterprise value: no net debt adjustment is modeled
    pub equity_value: f64,

    /// Undiscounted terminal value at the end of the horizon
    pub terminal_value: f64,

    /// Shares implied by market cap / market price (0 when price is 0)
    pub shares_outstanding: f64,

    pub fair_value_per_share: f64,

    pub market_price: f64,

    /// (fair value - price) / price, in percent
    pub upside_pct: f64,

    /// Forecast years in order, followed by the terminal row
    pub forecast: Vec<ForecastRow>,
}

impl ValuationResult {
    /// Explicit forecast rows, excluding the terminal row
    pub fn forecast_years(&self) -> &[ForecastRow] {
        match self.forecast.split_last() {
            Some((last, rest)) if last.period == ForecastPeriod::Terminal => rest,
            _ => &self.forecast,
        }
    }

    pub fn terminal_row(&self) -> Option<&ForecastRow> {
        self.forecast
            .last()
            .filter(|row| row.period == ForecastPeriod::Terminal)
    }

    /// True when the fair value is above the market price
    pub fn is_undervalued(&self) -> bool {
        self.upside_pct > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_labels() {
        assert_eq!(ForecastPeriod::Year(1).to_string(), "Year 1");
        assert_eq!(ForecastPeriod::Year(10).to_string(), "Year 10");
        assert_eq!(ForecastPeriod::Terminal.to_string(), "Terminal");
    }

    #[test]
    fn test_row_serializes_label_as_string() {
        let row = ForecastRow {
            period: ForecastPeriod::Year(3),
            projected_fcf: 10.0,
            discounted_fcf: 8.0,
        };
        let json = serde_json::to_value(row).unwrap();
        assert_eq!(json["year"], "Year 3");
        assert_eq!(json["projected_fcf"], 10.0);
    }
}
