//! DCF calculation pipeline
//!
//! forecast FCF -> terminal value -> discount -> enterprise value -> per share

use super::forecast::{ForecastPeriod, ForecastRow, ValuationResult};
use super::UNIT_SCALE_CRORE;
use crate::assumptions::Assumptions;
use crate::error::{Result, ValuationError};
use crate::input::ValuationInput;

/// Shares outstanding implied by market cap and price
///
/// `unit_scale` converts market cap to base currency units (1e7 for crores).
/// Returns 0 when the price is not positive.
pub fn derive_share_count(market_cap: f64, market_price: f64, unit_scale: f64) -> f64 {
    if market_price > 0.0 {
        market_cap * unit_scale / market_price
    } else {
        0.0
    }
}

/// Project `years` free cash flows, compounding from year 1
pub fn forecast_free_cash_flows(fcf0: f64, growth_rate: f64, years: u32) -> Vec<f64> {
    (1..=years)
        .map(|t| fcf0 * compound(growth_rate, t))
        .collect()
}

/// (1 + rate)^periods, exact integer powers where the exponent fits an i32
fn compound(rate: f64, periods: u32) -> f64 {
    match i32::try_from(periods) {
        Ok(n) => (1.0 + rate).powi(n),
        Err(_) => (1.0 + rate).powf(f64::from(periods)),
    }
}

/// Perpetuity-growth (Gordon) terminal value at the end of the horizon
///
/// Fails rather than returning infinity or a negative value when the
/// discount rate does not exceed terminal growth.
pub fn terminal_value(last_fcf: f64, terminal_growth_rate: f64, discount_rate: f64) -> Result<f64> {
    let spread = discount_rate - terminal_growth_rate;
    // Negated comparison also catches NaN
    if !(spread > 0.0) {
        return Err(ValuationError::DivergentTerminalValue {
            discount_rate,
            terminal_growth_rate,
        });
    }
    Ok(last_fcf * (1.0 + terminal_growth_rate) / spread)
}

/// Compound discount factor (1 + r)^periods
pub fn discount_factor(discount_rate: f64, periods: u32) -> f64 {
    compound(discount_rate, periods)
}

/// Discount a yearly series; index 0 is year 1
pub fn discount_series(values: &[f64], discount_rate: f64) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| value / discount_factor(discount_rate, i as u32 + 1))
        .collect()
}

/// Runs valuations for one assumption set
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    assumptions: Assumptions,
    unit_scale: f64,
}

impl ValuationEngine {
    /// Engine for crore-denominated inputs
    pub fn new(assumptions: Assumptions) -> Self {
        Self {
            assumptions,
            unit_scale: UNIT_SCALE_CRORE,
        }
    }

    /// Override the aggregate-to-base-unit conversion (1.0 when everything
    /// is already in base units)
    pub fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn unit_scale(&self) -> f64 {
        self.unit_scale
    }

    /// Value a company
    pub fn value(&self, input: &ValuationInput) -> Result<ValuationResult> {
        let a = &self.assumptions;
        a.validate()?;
        if !(self.unit_scale.is_finite() && self.unit_scale > 0.0) {
            return Err(ValuationError::InvalidAssumption(format!(
                "unit scale must be a positive number, got {}",
                self.unit_scale
            )));
        }

        let projected = forecast_free_cash_flows(input.free_cash_flow, a.fcf_growth_rate, a.forecast_years);
        let discounted = discount_series(&projected, a.discount_rate);

        // validate() guarantees at least one forecast year
        let last_fcf = projected.last().copied().unwrap_or(input.free_cash_flow);
        let terminal = terminal_value(last_fcf, a.terminal_growth_rate, a.discount_rate)?;
        let discounted_terminal = terminal / discount_factor(a.discount_rate, a.forecast_years);

        let enterprise_value = discounted.iter().sum::<f64>() + discounted_terminal;
        let equity_value = enterprise_value;

        let shares_outstanding =
            derive_share_count(input.market_cap, input.market_price, self.unit_scale);
        let fair_value_per_share = if shares_outstanding > 0.0 {
            equity_value * self.unit_scale / shares_outstanding
        } else {
            0.0
        };
        let upside_pct = if input.market_price > 0.0 {
            (fair_value_per_share - input.market_price) / input.market_price * 100.0
        } else {
            0.0
        };

        log::debug!(
            "EV={:.2} TV={:.2} shares={:.0} fair={:.2} upside={:.2}%",
            enterprise_value,
            terminal,
            shares_outstanding,
            fair_value_per_share,
            upside_pct
        );

        let mut forecast: Vec<ForecastRow> = projected
            .iter()
            .zip(&discounted)
            .enumerate()
            .map(|(i, (&projected_fcf, &discounted_fcf))| ForecastRow {
                period: ForecastPeriod::Year(i as u32 + 1),
                projected_fcf,
                discounted_fcf,
            })
            .collect();
        forecast.push(ForecastRow {
            period: ForecastPeriod::Terminal,
            projected_fcf: terminal,
            discounted_fcf: discounted_terminal,
        });

        Ok(ValuationResult {
            enterprise_value,
            equity_value,
            terminal_value: terminal,
            shares_outstanding,
            fair_value_per_share,
            market_price: input.market_price,
            upside_pct,
            forecast,
        })
    }
}

/// Value `input` under `assumptions` with crore-denominated aggregates
pub fn compute_valuation(input: &ValuationInput, assumptions: &Assumptions) -> Result<ValuationResult> {
    ValuationEngine::new(*assumptions).value(input)
}
