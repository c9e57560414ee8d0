//! Load assumptions from JSON documents
//!
//! Fields left out of the document take their defaults, so a file holding
//! only `{"growth_rate_pct": 2}` is a complete scenario.

use super::Assumptions;
use crate::error::ForecastError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load and validate assumptions from a JSON file
pub fn load_assumptions<P: AsRef<Path>>(path: P) -> Result<Assumptions, ForecastError> {
    let path = path.as_ref();
    log::debug!("Loading assumptions from {}", path.display());
    let file = File::open(path)?;
    load_assumptions_from_reader(BufReader::new(file))
}

/// Load and validate assumptions from any reader
pub fn load_assumptions_from_reader<R: Read>(reader: R) -> Result<Assumptions, ForecastError> {
    let assumptions: Assumptions = serde_json::from_reader(reader)?;
    assumptions.validate()?;
    Ok(assumptions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_uses_defaults() {
        let json = r#"{"growth_rate_pct": 2.5, "new_accounts_per_month": 4}"#;
        let assumptions = load_assumptions_from_reader(json.as_bytes()).expect("Failed to load");

        assert_eq!(assumptions.growth_rate_pct, 2.5);
        assert_eq!(assumptions.new_accounts_per_month, 4);
        assert_eq!(assumptions.starting_accounts, 65);
        assert_eq!(assumptions.starting_cash_balance, 1_400_000.0);
    }

    #[test]
    fn test_empty_document_is_default() {
        let assumptions = load_assumptions_from_reader("{}".as_bytes()).expect("Failed to load");
        assert_eq!(assumptions, Assumptions::default());
    }

    #[test]
    fn test_out_of_range_document_rejected() {
        let json = r#"{"marketplace_take_rate_pct": 140}"#;
        let err = load_assumptions_from_reader(json.as_bytes()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_malformed_document() {
        let err = load_assumptions_from_reader("{ not json".as_bytes()).unwrap_err();
        assert!(matches!(err, ForecastError::Json(_)));
    }

    #[test]
    fn test_bundled_scenario() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/growth.json");
        let assumptions = load_assumptions(path).expect("Failed to load");

        assert_eq!(assumptions.new_accounts_per_month, 15);
        assert_eq!(assumptions.account_churn_pct, 2.0);
        assert_eq!(assumptions.growth_rate_pct, 3.0);
        assert_eq!(assumptions.deal_size, 5_000.0);
    }

    #[test]
    fn test_missing_file() {
        let err = load_assumptions("does/not/exist.json").unwrap_err();
        assert!(matches!(err, ForecastError::Io(_)));
    }
}
