//! Forecast engine: twelve-month revenue, accounts, cash and runway recurrence

mod engine;
mod records;
mod state;

pub use engine::{compute_forecast, ForecastEngine};
pub use records::{ForecastResult, KpiSummary, MonthRecord, Runway};
pub use state::CarryState;

use crate::error::ForecastError;

/// Length of every forecast, in months
pub const FORECAST_MONTHS: u32 = 12;

/// Expenses step up after every month divisible by this
pub const QUARTER_LENGTH_MONTHS: u32 = 3;

/// Round to the nearest whole unit, ties to even
///
/// None when the rounded value is not finite or does not fit in an i64.
pub(crate) fn whole(value: f64) -> Option<i64> {
    let rounded = value.round_ties_even();
    // i64::MAX as f64 is 2^63, itself out of range
    if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

/// Error for a figure that left the representable range during a run
pub(crate) fn out_of_range(figure: &'static str, month: u32) -> ForecastError {
    ForecastError::invalid(
        figure,
        format!("assumptions drive this figure out of range in month {month}"),
    )
}
