//! Load company financials from the market-data JSON export
//!
//! The export nests the three figures in different places:
//! - `currentPrice.NSE` - market price per share
//! - `keyMetrics.financialstrength[]` entry keyed `freeCashFlowMostRecentFiscalYear`
//! - `stockDetailsReusableData.marketCap`
//!
//! Amounts usually arrive as strings with thousands separators ("1,50,000.25"),
//! occasionally as plain JSON numbers.

use super::{InputField, LoadedInput, ParseMode, ValuationInput};
use crate::error::{Result, ValuationError};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Metric key holding the most recent fiscal year free cash flow
pub const FCF_METRIC_KEY: &str = "freeCashFlowMostRecentFiscalYear";

/// Top-level financials document
///
/// Sections that are null or of the wrong shape read as empty, so one bad
/// section only costs the figures it holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialsDocument {
    #[serde(rename = "currentPrice", default, deserialize_with = "tolerant")]
    pub current_price: CurrentPrice,

    #[serde(rename = "keyMetrics", default, deserialize_with = "tolerant")]
    pub key_metrics: KeyMetrics,

    #[serde(rename = "stockDetailsReusableData", default, deserialize_with = "tolerant")]
    pub stock_details: StockDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentPrice {
    #[serde(rename = "NSE", default)]
    pub nse: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyMetrics {
    /// Raw `{ "key": .., "value": .. }` entries; malformed entries are skipped on lookup
    #[serde(rename = "financialstrength", default, deserialize_with = "tolerant")]
    pub financial_strength: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockDetails {
    #[serde(rename = "marketCap", default)]
    pub market_cap: Option<Value>,
}

/// Deserialize `T`, falling back to its default for null or mismatched JSON
fn tolerant<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(T::default()),
        other => Ok(T::deserialize(other).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed financials section: {}", e);
            T::default()
        })),
    }
}

/// Parse a currency amount, stripping thousands separators and surrounding
/// whitespace.
///
/// Returns `None` for empty or non-numeric text and for non-finite values.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Outcome of reading one amount out of the document
enum RawAmount {
    Absent,
    Malformed(String),
    Parsed(f64),
}

fn read_amount(value: Option<&Value>) -> RawAmount {
    match value {
        None | Some(Value::Null) => RawAmount::Absent,
        Some(Value::String(s)) if s.trim().is_empty() => RawAmount::Absent,
        Some(Value::String(s)) => match parse_amount(s) {
            Some(v) => RawAmount::Parsed(v),
            None => RawAmount::Malformed(s.clone()),
        },
        Some(Value::Number(n)) => match n.as_f64().filter(|v| v.is_finite()) {
            Some(v) => RawAmount::Parsed(v),
            None => RawAmount::Malformed(n.to_string()),
        },
        Some(other) => RawAmount::Malformed(other.to_string()),
    }
}

impl FinancialsDocument {
    /// First financial strength entry keyed as the latest fiscal year FCF
    fn free_cash_flow_value(&self) -> Option<&Value> {
        self.key_metrics
            .financial_strength
            .iter()
            .find(|m| m.get("key").and_then(Value::as_str) == Some(FCF_METRIC_KEY))
            .and_then(|m| m.get("value"))
    }

    /// Extract a `ValuationInput` from the document
    pub fn to_input(&self, mode: ParseMode) -> Result<LoadedInput> {
        let mut defaulted = Vec::new();

        let market_price = resolve(
            InputField::MarketPrice,
            self.current_price.nse.as_ref(),
            mode,
            &mut defaulted,
        )?;
        let free_cash_flow = resolve(
            InputField::FreeCashFlow,
            self.free_cash_flow_value(),
            mode,
            &mut defaulted,
        )?;
        let market_cap = resolve(
            InputField::MarketCap,
            self.stock_details.market_cap.as_ref(),
            mode,
            &mut defaulted,
        )?;

        Ok(LoadedInput {
            input: ValuationInput::new(market_price, free_cash_flow, market_cap),
            defaulted,
        })
    }
}

fn resolve(
    field: InputField,
    value: Option<&Value>,
    mode: ParseMode,
    defaulted: &mut Vec<InputField>,
) -> Result<f64> {
    match (read_amount(value), mode) {
        (RawAmount::Parsed(v), _) => Ok(v),
        (RawAmount::Absent, ParseMode::Strict) => Err(ValuationError::MissingField(field)),
        (RawAmount::Malformed(raw), ParseMode::Strict) => {
            Err(ValuationError::MalformedAmount { field, raw })
        }
        (RawAmount::Absent, ParseMode::Lenient) => {
            log::warn!("{} missing from financials, using 0", field);
            defaulted.push(field);
            Ok(0.0)
        }
        (RawAmount::Malformed(raw), ParseMode::Lenient) => {
            log::warn!("{} is not a number ({:?}), using 0", field, raw);
            defaulted.push(field);
            Ok(0.0)
        }
    }
}

/// Load financials from any reader
pub fn load_financials_from_reader<R: Read>(reader: R, mode: ParseMode) -> Result<LoadedInput> {
    let doc: FinancialsDocument = serde_json::from_reader(reader)?;
    doc.to_input(mode)
}

/// Load financials from a JSON file
pub fn load_financials<P: AsRef<Path>>(path: P, mode: ParseMode) -> Result<LoadedInput> {
    let path = path.as_ref();
    log::debug!("Loading financials from {}", path.display());
    let file = File::open(path)?;
    load_financials_from_reader(BufReader::new(file), mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "currentPrice": { "NSE": "1,234.50", "BSE": "1,234.10" },
        "keyMetrics": {
            "financialstrength": [
                { "key": "totalDebt", "value": "900" },
                { "key": "freeCashFlowMostRecentFiscalYear", "value": "5,120.30" }
            ]
        },
        "stockDetailsReusableData": { "marketCap": "1,50,000" }
    }"#;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.50"), Some(1234.5));
        assert_eq!(parse_amount("1,50,000"), Some(150_000.0));
        assert_eq!(parse_amount(" 42 "), Some(42.0));
        assert_eq!(parse_amount("-310.5"), Some(-310.5));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("1 2"), None);
        assert_eq!(parse_amount("1, 234"), None);
    }

    #[test]
    fn test_load_sample_document() {
        let loaded = load_financials_from_reader(SAMPLE.as_bytes(), ParseMode::Strict)
            .expect("sample should load");

        assert!(loaded.is_complete());
        assert_eq!(loaded.input.market_price, 1234.5);
        assert_eq!(loaded.input.free_cash_flow, 5120.3);
        assert_eq!(loaded.input.market_cap, 150_000.0);
    }

    #[test]
    fn test_numeric_json_values() {
        let json = r#"{
            "currentPrice": { "NSE": 500 },
            "keyMetrics": { "financialstrength": [
                { "key": "freeCashFlowMostRecentFiscalYear", "value": 100.0 } ] },
            "stockDetailsReusableData": { "marketCap": 50000 }
        }"#;
        let loaded = load_financials_from_reader(json.as_bytes(), ParseMode::Strict).unwrap();
        assert_eq!(loaded.input, ValuationInput::new(500.0, 100.0, 50_000.0));
    }

    #[test]
    fn test_lenient_defaults_missing_to_zero() {
        let json = r#"{ "currentPrice": { "NSE": "250" } }"#;
        let loaded = load_financials_from_reader(json.as_bytes(), ParseMode::Lenient).unwrap();

        assert_eq!(loaded.input.market_price, 250.0);
        assert_eq!(loaded.input.free_cash_flow, 0.0);
        assert_eq!(loaded.input.market_cap, 0.0);
        assert_eq!(
            loaded.defaulted,
            vec![InputField::FreeCashFlow, InputField::MarketCap]
        );
        assert!(!loaded.is_complete());
    }

    #[test]
    fn test_lenient_defaults_malformed_to_zero() {
        let json = r#"{
            "currentPrice": { "NSE": "--" },
            "keyMetrics": { "financialstrength": [
                { "key": "freeCashFlowMostRecentFiscalYear", "value": "12" } ] },
            "stockDetailsReusableData": { "marketCap": "9,000" }
        }"#;
        let loaded = load_financials_from_reader(json.as_bytes(), ParseMode::Lenient).unwrap();

        assert_eq!(loaded.input.market_price, 0.0);
        assert_eq!(loaded.defaulted, vec![InputField::MarketPrice]);
    }

    #[test]
    fn test_strict_rejects_missing_field() {
        let json = r#"{ "currentPrice": { "NSE": "250" } }"#;
        let err = load_financials_from_reader(json.as_bytes(), ParseMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::MissingField(InputField::FreeCashFlow)
        ));
    }

    #[test]
    fn test_strict_rejects_malformed_amount() {
        let json = r#"{
            "currentPrice": { "NSE": "12O" },
            "keyMetrics": { "financialstrength": [
                { "key": "freeCashFlowMostRecentFiscalYear", "value": "1" } ] },
            "stockDetailsReusableData": { "marketCap": "1" }
        }"#;
        let err = load_financials_from_reader(json.as_bytes(), ParseMode::Strict).unwrap_err();
        match err {
            ValuationError::MalformedAmount { field, raw } => {
                assert_eq!(field, InputField::MarketPrice);
                assert_eq!(raw, "12O");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_first_matching_metric_wins() {
        let json = r#"{
            "keyMetrics": { "financialstrength": [
                { "key": "freeCashFlowMostRecentFiscalYear", "value": "10" },
                { "key": "freeCashFlowMostRecentFiscalYear", "value": "20" } ] }
        }"#;
        let loaded = load_financials_from_reader(json.as_bytes(), ParseMode::Lenient).unwrap();
        assert_eq!(loaded.input.free_cash_flow, 10.0);
    }

    #[test]
    fn test_lenient_null_section_defaults_its_field() {
        let json = r#"{
            "currentPrice": { "NSE": "500" },
            "keyMetrics": null,
            "stockDetailsReusableData": { "marketCap": "50,000" }
        }"#;
        let loaded = load_financials_from_reader(json.as_bytes(), ParseMode::Lenient).unwrap();

        assert_eq!(loaded.input, ValuationInput::new(500.0, 0.0, 50_000.0));
        assert_eq!(loaded.defaulted, vec![InputField::FreeCashFlow]);
    }

    #[test]
    fn test_lenient_wrong_shape_sections() {
        let json = r#"{
            "currentPrice": "500",
            "keyMetrics": { "financialstrength": { "key": "freeCashFlowMostRecentFiscalYear" } },
            "stockDetailsReusableData": 42
        }"#;
        let loaded = load_financials_from_reader(json.as_bytes(), ParseMode::Lenient).unwrap();

        assert_eq!(loaded.input, ValuationInput::default());
        assert_eq!(loaded.defaulted.len(), 3);
    }

    #[test]
    fn test_malformed_metric_entries_are_skipped() {
        let json = r#"{
            "currentPrice": { "NSE": "500" },
            "keyMetrics": { "financialstrength": [
                { "key": 7, "value": "1" },
                "freeCashFlowMostRecentFiscalYear",
                null,
                { "key": "freeCashFlowMostRecentFiscalYear", "value": "100" } ] },
            "stockDetailsReusableData": { "marketCap": "50,000" }
        }"#;
        let loaded = load_financials_from_reader(json.as_bytes(), ParseMode::Lenient).unwrap();

        assert!(loaded.is_complete());
        assert_eq!(loaded.input.free_cash_flow, 100.0);
    }

    #[test]
    fn test_strict_null_section_is_missing_field() {
        let json = r#"{
            "currentPrice": { "NSE": "500" },
            "keyMetrics": null,
            "stockDetailsReusableData": { "marketCap": "50,000" }
        }"#;
        let err = load_financials_from_reader(json.as_bytes(), ParseMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::MissingField(InputField::FreeCashFlow)
        ));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = load_financials_from_reader("{ not json".as_bytes(), ParseMode::Lenient)
            .unwrap_err();
        assert!(matches!(err, ValuationError::Json(_)));
    }
}
