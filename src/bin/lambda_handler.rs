//! AWS Lambda handler for deal analysis
//!
//! Accepts deal parameters as JSON and returns the computed results together
//! with their display strings. Invalid or undefined deals are reported in the
//! `error` field of a normal response rather than as invocation failures.

use deal_analyzer::{
    deal::{DealCostCalculator, DealParameters, MaturityPolicy},
    report::{format_field, DealReport},
    DealError, DealResults,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Input for one analysis
#[derive(Debug, Default, Deserialize)]
pub struct DealRequest {
    /// Deal parameters (missing fields use reference defaults)
    #[serde(default)]
    pub parameters: DealParameters,

    /// Treatment of hold periods past bank loan maturity
    #[serde(default)]
    pub maturity_policy: MaturityPolicy,

    /// Include the rendered "Deal Analysis" text document
    #[serde(default)]
    pub include_report: bool,
}

/// One formatted result line
#[derive(Debug, Serialize)]
pub struct DisplayLine {
    pub field: &'static str,
    pub label: &'static str,
    pub display: String,
}

/// Output of one analysis
#[derive(Debug, Serialize)]
pub struct DealResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<DealResults>,
    pub display: Vec<DisplayLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn analyze(request: &DealRequest) -> DealResponse {
    let start = std::time::Instant::now();
    let calculator = DealCostCalculator::with_maturity_policy(request.maturity_policy);

    match calculator.compute(&request.parameters) {
        Ok(results) => {
            let display = results
                .fields()
                .map(|(field, value)| DisplayLine {
                    field: field.key(),
                    label: field.label(),
                    display: format_field(field, value),
                })
                .collect();
            let report = request
                .include_report
                .then(|| DealReport::new(request.parameters, results).to_text());

            DealResponse {
                results: Some(results),
                display,
                report,
                execution_time_ms: start.elapsed().as_millis() as u64,
                error_kind: None,
                error: None,
            }
        }
        Err(e) => {
            let kind = match e {
                DealError::InvalidInput { .. } => "InvalidInput",
                DealError::ComputationUndefined(_) => "ComputationUndefined",
            };
            DealResponse {
                results: None,
                display: Vec::new(),
                report: None,
                execution_time_ms: start.elapsed().as_millis() as u64,
                error_kind: Some(kind),
                error: Some(e.to_string()),
            }
        }
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<DealRequest>) -> Result<DealResponse, Error> {
    let response = analyze(&event.payload);
    match &response.error {
        Some(e) => warn!("Deal analysis rejected: {}", e),
        None => info!("Deal analysis completed in {} ms", response.execution_time_ms),
    }
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request_uses_reference_deal() {
        let request: DealRequest = serde_json::from_str("{}").unwrap();
        let response = analyze(&request);

        assert!(response.error.is_none());
        assert!(response.report.is_none());
        assert_eq!(response.display.len(), 13);
        assert_eq!(response.display[0].display, "$780,000.00");
        assert_eq!(response.display[12].display, "11.52%");
    }

    #[test]
    fn test_report_included_on_request() {
        let request: DealRequest = serde_json::from_str(
            r#"{"parameters": {"bank_interest_rate": 0.0}, "include_report": true}"#,
        )
        .unwrap();
        let response = analyze(&request);

        let report = response.report.unwrap();
        assert!(report.starts_with("Deal Analysis\n"));
        assert!(report.contains("Monthly Bank Payment: $2,166.67"));
    }

    #[test]
    fn test_maturity_policy_from_json() {
        let request: DealRequest = serde_json::from_str(
            r#"{"parameters": {"loan_term_years": 5}, "maturity_policy": "extrapolate"}"#,
        )
        .unwrap();
        let results = analyze(&request).results.unwrap();
        assert!(results.remaining_balance_bank < 0.0);
    }

    #[test]
    fn test_errors_are_reported_in_body() {
        let request: DealRequest =
            serde_json::from_str(r#"{"parameters": {"hold_years": 0}}"#).unwrap();
        let response = analyze(&request);

        assert!(response.results.is_none());
        assert_eq!(response.error_kind, Some("InvalidInput"));

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("results").is_none());
        assert!(json["error"].as_str().unwrap().contains("hold_years"));
    }

    #[test]
    fn test_undefined_cost_kind() {
        let request: DealRequest =
            serde_json::from_str(r#"{"parameters": {"seller_down_payment": 800000}}"#).unwrap();
        assert_eq!(analyze(&request).error_kind, Some("ComputationUndefined"));
    }
}
