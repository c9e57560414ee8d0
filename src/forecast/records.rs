//! Monthly forecast records, runway and year-end KPIs

use super::{out_of_range, whole};
use crate::error::ForecastError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Months of operation left at the current burn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Runway {
    /// Net burn is zero or positive: cash is flat or growing
    #[default]
    Infinite,
    /// Whole months until cash reaches zero. Zero or negative once cash is already gone.
    Finite(i64),
}

impl Runway {
    /// Runway for a month given its closing cash and net burn
    ///
    /// Negative cash with negative burn yields a negative month count; that
    /// result is reported as-is rather than clamped.
    pub fn from_burn(cash_balance: i64, net_burn: i64) -> Self {
        if net_burn >= 0 {
            Runway::Infinite
        } else {
            // Only a burn of exactly -1 can put the quotient at the i64 edge,
            // and then the quotient is the cash balance itself.
            let months = whole(cash_balance as f64 / -(net_burn as f64)).unwrap_or(cash_balance);
            Runway::Finite(months)
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Runway::Infinite)
    }

    /// Month count, or None for infinite runway
    pub fn months(&self) -> Option<i64> {
        match self {
            Runway::Infinite => None,
            Runway::Finite(months) => Some(*months),
        }
    }
}

impl fmt::Display for Runway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runway::Infinite => write!(f, "Infinite"),
            Runway::Finite(months) => write!(f, "{}", months),
        }
    }
}

/// One month of the forecast. All amounts are whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Month index, 1-based
    pub month: u32,

    // Revenue
    /// Gross fractional deal value (not part of net revenue)
    pub total_revenue: i64,
    pub fractional_revenue: i64,
    pub marketplace_revenue: i64,
    pub net_revenue: i64,

    // Accounts
    pub active_accounts: i64,
    pub lost_accounts: i64,

    // Cash
    pub monthly_expenses: i64,
    /// Net revenue less expenses; negative when cash is being consumed
    pub net_burn: i64,
    pub cash_balance: i64,
    pub runway: Runway,
}

/// Headline figures for the forecast year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Fractional plus marketplace revenue across all months
    pub total_revenue_year: i64,
    pub ending_active_accounts: i64,
    pub ending_cash_balance: i64,
    pub ending_runway: Runway,
}

impl KpiSummary {
    /// Year totals and closing figures; errors if the revenue total overflows
    pub fn from_months(months: &[MonthRecord]) -> Result<Self, ForecastError> {
        let total_revenue_year = months
            .iter()
            .try_fold(0i64, |total, m| {
                total
                    .checked_add(m.fractional_revenue)?
                    .checked_add(m.marketplace_revenue)
            })
            .ok_or_else(|| out_of_range("total_revenue_year", months.len() as u32))?;

        let closing = months.last();

        Ok(KpiSummary {
            total_revenue_year,
            ending_active_accounts: closing.map_or(0, |m| m.active_accounts),
            ending_cash_balance: closing.map_or(0, |m| m.cash_balance),
            ending_runway: closing.map_or(Runway::Infinite, |m| m.runway),
        })
    }
}

/// Complete output of a forecast run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Monthly records ordered by month index
    pub months: Vec<MonthRecord>,
    pub kpis: KpiSummary,
}

impl ForecastResult {
    pub fn from_months(months: Vec<MonthRecord>) -> Result<Self, ForecastError> {
        let kpis = KpiSummary::from_months(&months)?;
        Ok(Self { months, kpis })
    }

    /// Record for a 1-based month index
    pub fn month(&self, month: u32) -> Option<&MonthRecord> {
        self.months.iter().find(|m| m.month == month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: u32, fractional: i64, marketplace: i64, cash: i64, burn: i64) -> MonthRecord {
        MonthRecord {
            month,
            total_revenue: fractional,
            fractional_revenue: fractional,
            marketplace_revenue: marketplace,
            net_revenue: fractional + marketplace,
            active_accounts: 10 + month as i64,
            lost_accounts: 1,
            monthly_expenses: fractional + marketplace - burn,
            net_burn: burn,
            cash_balance: cash,
            runway: Runway::from_burn(cash, burn),
        }
    }

    #[test]
    fn test_runway_from_burn() {
        assert_eq!(Runway::from_burn(1_368_720, -31_280), Runway::Finite(44));
        assert_eq!(Runway::from_burn(1_000, 0), Runway::Infinite);
        assert_eq!(Runway::from_burn(-1_000, 5), Runway::Infinite);
        // Cash already exhausted: literal arithmetic, not clamped
        assert_eq!(Runway::from_burn(-31_280, -31_280), Runway::Finite(-1));
        assert_eq!(Runway::from_burn(0, -10), Runway::Finite(0));
    }

    #[test]
    fn test_runway_rounds_half_to_even() {
        assert_eq!(Runway::from_burn(25, -10), Runway::Finite(2));
        assert_eq!(Runway::from_burn(35, -10), Runway::Finite(4));
    }

    #[test]
    fn test_runway_display() {
        assert_eq!(Runway::Infinite.to_string(), "Infinite");
        assert_eq!(Runway::Finite(44).to_string(), "44");
        assert_eq!(Runway::Finite(44).months(), Some(44));
        assert_eq!(Runway::Infinite.months(), None);
    }

    #[test]
    fn test_runway_serialization() {
        assert_eq!(serde_json::to_string(&Runway::Infinite).unwrap(), "\"infinite\"");
        assert_eq!(serde_json::to_string(&Runway::Finite(12)).unwrap(), "{\"finite\":12}");
    }

    #[test]
    fn test_kpis_from_months() {
        let months = vec![
            record(1, 100, 50, 900, -50),
            record(2, 110, 60, 870, -30),
            record(3, 120, 70, 880, 10),
        ];
        let result = ForecastResult::from_months(months).unwrap();

        assert_eq!(result.kpis.total_revenue_year, 510);
        assert_eq!(result.kpis.ending_active_accounts, 13);
        assert_eq!(result.kpis.ending_cash_balance, 880);
        assert_eq!(result.kpis.ending_runway, Runway::Infinite);
        assert_eq!(result.month(2).map(|m| m.cash_balance), Some(870));
        assert!(result.month(13).is_none());
    }

    #[test]
    fn test_kpi_revenue_total_overflow() {
        let months: Vec<MonthRecord> = (1..=12)
            .map(|month| record(month, i64::MAX / 4, 0, 1_000, -1))
            .collect();

        let err = ForecastResult::from_months(months).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("total_revenue_year"));
    }

    #[test]
    fn test_runway_at_i64_edge() {
        assert_eq!(Runway::from_burn(i64::MAX, -1), Runway::Finite(i64::MAX));
        assert_eq!(Runway::from_burn(i64::MIN, -1), Runway::Finite(i64::MIN));
        assert_eq!(Runway::from_burn(i64::MAX, i64::MIN), Runway::Finite(1));
    }
}
