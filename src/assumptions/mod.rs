//! Business assumptions driving a single forecast run
//!
//! Defaults reproduce the reference planning scenario: 65 starting accounts,
//! 11 new per month, $5,000 deals, $250k monthly GMV and $1.4M in the bank.

pub mod loader;

pub use loader::{load_assumptions, load_assumptions_from_reader};

use crate::error::ForecastError;
use crate::forecast::whole;
use serde::{Deserialize, Serialize};

/// Scalar inputs for one forecast run
///
/// Percentages are expressed in whole percent (20.0 = 20%). Missing fields
/// in a serialized document fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Active fractional accounts before month 1
    #[serde(default = "default_starting_accounts")]
    pub starting_accounts: i64,

    /// Accounts added each month (negative models decline)
    #[serde(default = "default_new_accounts")]
    pub new_accounts_per_month: i64,

    /// Average monthly deal size per active account
    #[serde(default = "default_deal_size")]
    pub deal_size: f64,

    /// Share of fractional deal revenue kept, in percent
    #[serde(default = "default_take_rate")]
    pub take_rate_pct: f64,

    /// Share of accounts lost each month, in percent
    #[serde(default = "default_churn")]
    pub account_churn_pct: f64,

    /// Marketplace GMV for month 1
    #[serde(default = "default_monthly_gmv")]
    pub monthly_gmv: f64,

    /// Share of marketplace GMV kept, in percent
    #[serde(default = "default_marketplace_take_rate")]
    pub marketplace_take_rate_pct: f64,

    /// Month-over-month GMV growth, in percent (signed)
    #[serde(default = "default_growth_rate")]
    pub growth_rate_pct: f64,

    #[serde(default = "default_starting_cash")]
    pub starting_cash_balance: f64,

    #[serde(default = "default_starting_expenses")]
    pub starting_monthly_expenses: f64,

    /// Added to monthly expenses after every third month
    #[serde(default = "default_quarterly_increase")]
    pub quarterly_expense_increase: f64,
}

fn default_starting_accounts() -> i64 {
    65
}
fn default_new_accounts() -> i64 {
    11
}
fn default_deal_size() -> f64 {
    5_000.0
}
fn default_take_rate() -> f64 {
    20.0
}
fn default_churn() -> f64 {
    3.0
}
fn default_monthly_gmv() -> f64 {
    250_000.0
}
fn default_marketplace_take_rate() -> f64 {
    18.0
}
fn default_growth_rate() -> f64 {
    -1.0
}
fn default_starting_cash() -> f64 {
    1_400_000.0
}
fn default_starting_expenses() -> f64 {
    150_000.0
}
fn default_quarterly_increase() -> f64 {
    20_000.0
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            starting_accounts: default_starting_accounts(),
            new_accounts_per_month: default_new_accounts(),
            deal_size: default_deal_size(),
            take_rate_pct: default_take_rate(),
            account_churn_pct: default_churn(),
            monthly_gmv: default_monthly_gmv(),
            marketplace_take_rate_pct: default_marketplace_take_rate(),
            growth_rate_pct: default_growth_rate(),
            starting_cash_balance: default_starting_cash(),
            starting_monthly_expenses: default_starting_expenses(),
            quarterly_expense_increase: default_quarterly_increase(),
        }
    }
}

impl Assumptions {
    /// Check documented ranges. Values are rejected, never clamped.
    ///
    /// Negative growth, negative new accounts and 100% churn are valid
    /// decline scenarios and pass.
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.starting_accounts < 0 {
            return Err(ForecastError::invalid(
                "starting_accounts",
                format!("must be non-negative, got {}", self.starting_accounts),
            ));
        }

        check_non_negative("deal_size", self.deal_size)?;
        check_percentage("take_rate_pct", self.take_rate_pct)?;
        check_percentage("account_churn_pct", self.account_churn_pct)?;
        check_percentage("marketplace_take_rate_pct", self.marketplace_take_rate_pct)?;

        check_finite("monthly_gmv", self.monthly_gmv)?;
        check_finite("growth_rate_pct", self.growth_rate_pct)?;
        check_finite("starting_cash_balance", self.starting_cash_balance)?;
        if whole(self.starting_cash_balance).is_none() {
            return Err(ForecastError::invalid(
                "starting_cash_balance",
                format!("must fit in a whole amount, got {}", self.starting_cash_balance),
            ));
        }
        check_finite("starting_monthly_expenses", self.starting_monthly_expenses)?;
        check_finite("quarterly_expense_increase", self.quarterly_expense_increase)?;

        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ForecastError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ForecastError::invalid(field, format!("must be a finite number, got {value}")))
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ForecastError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ForecastError::invalid(field, format!("must be non-negative, got {value}")));
    }
    Ok(())
}

fn check_percentage(field: &'static str, value: f64) -> Result<(), ForecastError> {
    check_finite(field, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ForecastError::invalid(
            field,
            format!("must be between 0 and 100, got {value}"),
        ));
    }
    Ok(())
}
