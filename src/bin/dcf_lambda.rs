//! AWS Lambda HTTP handler for single-company valuations
//!
//! POST body:
//! `{ "financials": {...}, "assumptions": {...}, "strict": false }`
//! where `assumptions` (ratios) and `strict` are optional.

use dcf_valuation::{
    input::FinancialsDocument, Assumptions, InputField, ParseMode, ValuationEngine,
    ValuationError, ValuationResult,
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
struct ValuationRequest {
    financials: FinancialsDocument,
    #[serde(default)]
    assumptions: Option<Assumptions>,
    #[serde(default)]
    strict: bool,
}

#[derive(Debug, Serialize)]
struct ValuationResponse {
    assumptions: Assumptions,
    result: ValuationResult,
    /// Inputs that were missing or malformed and valued at zero
    defaulted: Vec<InputField>,
}

fn evaluate(body: &[u8]) -> Result<ValuationResponse, ValuationError> {
    let request: ValuationRequest = serde_json::from_slice(body)?;
    let mode = if request.strict { ParseMode::Strict } else { ParseMode::Lenient };
    let loaded = request.financials.to_input(mode)?;
    let assumptions = request.assumptions.unwrap_or_default();

    let result = ValuationEngine::new(assumptions).value(&loaded.input)?;
    Ok(ValuationResponse {
        assumptions,
        result,
        defaulted: loaded.defaulted,
    })
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let (status, payload) = match evaluate(event.body().as_ref()) {
        Ok(response) => (200, serde_json::to_value(response)?),
        Err(e) => {
            log::warn!("Rejected valuation request: {}", e);
            (400, json!({ "error": e.to_string() }))
        }
    };

    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
