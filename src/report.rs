//! Report output for a valuation run: CSV forecast table and text summary

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::input::LoadedInput;
use crate::valuation::{ValuationResult, UNIT_SCALE_CRORE};
use std::io::Write;

/// Column headers of the forecast table
pub const FORECAST_HEADERS: [&str; 3] = ["Year", "FCF", "Discounted FCF"];

/// Write the forecast table as CSV, amounts rounded to 2 decimals
pub fn write_forecast_csv<W: Write>(result: &ValuationResult, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(FORECAST_HEADERS)?;
    for row in &result.forecast {
        wtr.write_record([
            row.period.to_string(),
            format!("{:.2}", row.projected_fcf),
            format!("{:.2}", row.discounted_fcf),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Forecast table as an in-memory CSV string
pub fn forecast_csv_string(result: &ValuationResult) -> Result<String> {
    let mut buf = Vec::new();
    write_forecast_csv(result, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Format with 2 decimals and comma thousands separators: 1234567.891 -> "1,234,567.89"
pub fn format_grouped(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some(parts) => parts,
        None => return format!("{:.2}", value),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Plain-text summary: inputs, assumptions, forecast table and headline figures
pub fn render_summary(
    loaded: &LoadedInput,
    assumptions: &Assumptions,
    result: &ValuationResult,
) -> String {
    let input = &loaded.input;
    let mut lines = vec![
        format!("Free Cash Flow (crores): {}", format_grouped(input.free_cash_flow)),
        format!("Current Market Price: {:.2}", input.market_price),
        format!("Market Cap (crores): {}", format_grouped(input.market_cap)),
        format!(
            "Shares Outstanding (crores): {:.2}",
            result.shares_outstanding / UNIT_SCALE_CRORE
        ),
        String::new(),
        format!(
            "Assumptions: FCF growth {:.2}%, terminal growth {:.2}%, discount rate {:.2}%, {} years",
            assumptions.fcf_growth_rate * 100.0,
            assumptions.terminal_growth_rate * 100.0,
            assumptions.discount_rate * 100.0,
            assumptions.forecast_years
        ),
        String::new(),
        format!(
            "{:<10} {:>18} {:>18}",
            FORECAST_HEADERS[0], FORECAST_HEADERS[1], FORECAST_HEADERS[2]
        ),
    ];

    for row in &result.forecast {
        lines.push(format!(
            "{:<10} {:>18} {:>18}",
            row.period.to_string(),
            format_grouped(row.projected_fcf),
            format_grouped(row.discounted_fcf)
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Enterprise Value (crores): {}",
        format_grouped(result.enterprise_value)
    ));
    lines.push(format!("Fair Value per Share: {:.2}", result.fair_value_per_share));
    lines.push(format!("Current Market Price: {:.2}", result.market_price));
    lines.push(format!("Upside/Downside: {:.2}%", result.upside_pct));

    if !loaded.defaulted.is_empty() {
        let fields: Vec<String> = loaded.defaulted.iter().map(|f| f.to_string()).collect();
        lines.push(String::new());
        lines.push(format!(
            "Warning: missing or unreadable inputs were set to zero: {}",
            fields.join(", ")
        ));
    }

    lines.join("\n")
}
