//! Rendering of forecast results for the command line and file output
//!
//! The data table leaves out gross total revenue; it is kept in CSV and JSON.

use crate::error::ForecastError;
use crate::forecast::{ForecastResult, KpiSummary, MonthRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

/// Label for a forecast month within a calendar year, e.g. "Jan 2024"
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"))
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Dollar amount, e.g. "$1,368,720" or "-$31,280"
pub fn format_currency(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}${}", group_digits(amount.unsigned_abs()))
}

/// One CSV row per month
#[derive(Debug, Serialize)]
struct CsvRow {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Total Revenue")]
    total_revenue: i64,
    #[serde(rename = "Fractional Revenue")]
    fractional_revenue: i64,
    #[serde(rename = "Marketplace Revenue")]
    marketplace_revenue: i64,
    #[serde(rename = "Net Revenue")]
    net_revenue: i64,
    #[serde(rename = "Active Accounts")]
    active_accounts: i64,
    #[serde(rename = "Lost Accounts")]
    lost_accounts: i64,
    #[serde(rename = "Monthly Expenses")]
    monthly_expenses: i64,
    #[serde(rename = "Net Burn")]
    net_burn: i64,
    #[serde(rename = "Cash Balance")]
    cash_balance: i64,
    #[serde(rename = "Runway")]
    runway: String,
}

impl CsvRow {
    fn new(year: i32, record: &MonthRecord) -> Self {
        Self {
            month: month_label(year, record.month),
            total_revenue: record.total_revenue,
            fractional_revenue: record.fractional_revenue,
            marketplace_revenue: record.marketplace_revenue,
            net_revenue: record.net_revenue,
            active_accounts: record.active_accounts,
            lost_accounts: record.lost_accounts,
            monthly_expenses: record.monthly_expenses,
            net_burn: record.net_burn,
            cash_balance: record.cash_balance,
            runway: record.runway.to_string(),
        }
    }
}

/// Write the monthly table as CSV
pub fn write_csv<W: Write>(
    result: &ForecastResult,
    year: i32,
    writer: W,
) -> Result<(), ForecastError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in &result.months {
        csv_writer.serialize(CsvRow::new(year, record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the full result as pretty-printed JSON
pub fn write_json<W: Write>(result: &ForecastResult, writer: W) -> Result<(), ForecastError> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}

/// Monthly data table as aligned text
pub fn render_table(result: &ForecastResult, year: i32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>14} {:>14} {:>14} {:>8} {:>6} {:>14} {:>14} {:>14} {:>9}",
        "Month",
        "Fractional",
        "Marketplace",
        "Net Revenue",
        "Active",
        "Lost",
        "Expenses",
        "Net Burn",
        "Cash",
        "Runway",
    );
    for record in &result.months {
        let _ = writeln!(
            out,
            "{:<10} {:>14} {:>14} {:>14} {:>8} {:>6} {:>14} {:>14} {:>14} {:>9}",
            month_label(year, record.month),
            format_currency(record.fractional_revenue),
            format_currency(record.marketplace_revenue),
            format_currency(record.net_revenue),
            record.active_accounts,
            record.lost_accounts,
            format_currency(record.monthly_expenses),
            format_currency(record.net_burn),
            format_currency(record.cash_balance),
            record.runway,
        );
    }
    out
}

/// Year-end KPI table
pub fn render_kpis(kpis: &KpiSummary, year: i32) -> String {
    let rows = [
        ("Total Revenue", format_currency(kpis.total_revenue_year)),
        ("Active Fractionals", kpis.ending_active_accounts.to_string()),
        ("Ending Cash Balance", format_currency(kpis.ending_cash_balance)),
        ("Runway in Months", kpis.ending_runway.to_string()),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "{:<22} {:>14}", format!("{year} KPIs"), "Value");
    for (label, value) in rows {
        let _ = writeln!(out, "{:<22} {:>14}", label, value);
    }
    out
}
