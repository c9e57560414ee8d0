//! Runway Forecast - twelve-month projection engine for a fractional + marketplace business
//!
//! This library provides:
//! - Business assumptions with documented defaults and range validation
//! - The month-by-month revenue, accounts, cash and runway recurrence
//! - Year-end KPI summary
//! - Text, CSV and JSON reporting for the outer surfaces

pub mod error;
pub mod assumptions;
pub mod forecast;
pub mod report;

// Re-export commonly used types
pub use error::ForecastError;
pub use assumptions::Assumptions;
pub use forecast::{
    compute_forecast, ForecastEngine, ForecastResult, KpiSummary, MonthRecord, Runway,
};
