//! AWS Lambda HTTP handler for forecasts
//!
//! Accepts a JSON body of assumptions (fields may be omitted; an empty body
//! runs the default scenario) and responds with the forecast as JSON.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use runway_forecast::{compute_forecast, Assumptions, ForecastError};
use serde_json::json;

fn json_response(status: u16, body: String) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))?;
    Ok(response)
}

fn parse_assumptions(body: &[u8]) -> Result<Assumptions, ForecastError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Assumptions::default());
    }
    Ok(serde_json::from_slice(body)?)
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let assumptions = match parse_assumptions(event.body()) {
        Ok(assumptions) => assumptions,
        Err(err) => {
            log::warn!("Rejected request body: {}", err);
            return json_response(400, json!({ "error": err.to_string() }).to_string());
        }
    };

    match compute_forecast(assumptions) {
        Ok(result) => {
            log::info!(
                "Forecast served: revenue={}, cash={}, runway={}",
                result.kpis.total_revenue_year,
                result.kpis.ending_cash_balance,
                result.kpis.ending_runway,
            );
            json_response(200, serde_json::to_string(&result)?)
        }
        Err(err) if err.is_invalid_input() => {
            log::warn!("Rejected assumptions: {}", err);
            json_response(400, json!({ "error": err.to_string() }).to_string())
        }
        Err(err) => Err(err.into()),
    }
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
    fn test_empty_body_is_default() {
        assert_eq!(parse_assumptions(b"").unwrap(), Assumptions::default());
        assert_eq!(parse_assumptions(b"  \n").unwrap(), Assumptions::default());
    }

    #[test]
    fn test_partial_body() {
        let assumptions = parse_assumptions(br#"{"account_churn_pct": 5}"#).unwrap();
        assert_eq!(assumptions.account_churn_pct, 5.0);
        assert_eq!(assumptions.deal_size, 5_000.0);
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(parse_assumptions(b"{"), Err(ForecastError::Json(_))));
    }
}
