//! DCF assumptions: growth, terminal growth, discount rate and horizon

pub mod loader;

use crate::error::{Result, ValuationError};
use serde::{Deserialize, Serialize};

/// Shortest allowed explicit forecast horizon (years)
pub const MIN_FORECAST_YEARS: u32 = 1;

/// Longest allowed explicit forecast horizon (years)
pub const MAX_FORECAST_YEARS: u32 = 10;

/// One assumption set for a valuation run.
///
/// Rates are ratios (0.12 = 12%). Omitted fields take the defaults below
/// when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Annual growth applied to free cash flow over the forecast horizon
    /// Default: 0.15 (15%)
    #[serde(default = "default_fcf_growth_rate")]
    pub fcf_growth_rate: f64,

    /// Perpetual growth after the horizon
    /// Default: 0.04 (4%)
    #[serde(default = "default_terminal_growth_rate")]
    pub terminal_growth_rate: f64,

    /// Annual discount rate (cost of capital)
    /// Default: 0.12 (12%)
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    /// Number of explicit forecast years, 1 to 10
    /// Default: 5
    #[serde(default = "default_forecast_years")]
    pub forecast_years: u32,
}

fn default_fcf_growth_rate() -> f64 { 0.15 }
fn default_terminal_growth_rate() -> f64 { 0.04 }
fn default_discount_rate() -> f64 { 0.12 }
fn default_forecast_years() -> u32 { 5 }

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            fcf_growth_rate: 0.15,
            terminal_growth_rate: 0.04,
            discount_rate: 0.12,
            forecast_years: 5,
        }
    }
}

impl Assumptions {
    /// Build from percentages as a user would type them (15.0 = 15%)
    pub fn from_percentages(
        fcf_growth_pct: f64,
        terminal_growth_pct: f64,
        discount_rate_pct: f64,
        forecast_years: u32,
    ) -> Self {
        Self {
            fcf_growth_rate: fcf_growth_pct / 100.0,
            terminal_growth_rate: terminal_growth_pct / 100.0,
            discount_rate: discount_rate_pct / 100.0,
            forecast_years,
        }
    }

    /// Check the assumption set can produce a finite valuation
    ///
    /// Rejects non-finite rates, rates at or below -100%, a horizon outside
    /// 1..=10 and a discount rate that does not exceed terminal growth.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("fcf_growth_rate", self.fcf_growth_rate),
            ("terminal_growth_rate", self.terminal_growth_rate),
            ("discount_rate", self.discount_rate),
        ];
        for (name, rate) in rates {
            if !rate.is_finite() {
                return Err(ValuationError::InvalidAssumption(format!(
                    "{} must be a finite number, got {}",
                    name, rate
                )));
            }
            if rate <= -1.0 {
                return Err(ValuationError::InvalidAssumption(format!(
                    "{} must be greater than -100%, got {:.2}%",
                    name,
                    rate * 100.0
                )));
            }
        }

        if !(MIN_FORECAST_YEARS..=MAX_FORECAST_YEARS).contains(&self.forecast_years) {
            return Err(ValuationError::InvalidAssumption(format!(
                "forecast_years must be between {} and {}, got {}",
                MIN_FORECAST_YEARS, MAX_FORECAST_YEARS, self.forecast_years
            )));
        }

        if self.discount_rate <= self.terminal_growth_rate {
            return Err(ValuationError::DivergentTerminalValue {
                discount_rate: self.discount_rate,
                terminal_growth_rate: self.terminal_growth_rate,
            });
        }

        Ok(())
    }
}
