//! Carry-forward state threaded from one forecast month to the next

use super::{whole, QUARTER_LENGTH_MONTHS};
use crate::assumptions::Assumptions;
use crate::error::ForecastError;

/// Values carried into a month from the month before
///
/// Accounts and cash are the previous month's rounded, stored figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarryState {
    pub active_accounts: i64,
    /// GMV earning marketplace revenue this month
    pub monthly_gmv: f64,
    pub cash_balance: i64,
    /// Expense run-rate; only steps at quarter ends
    pub monthly_expenses: f64,
}

impl CarryState {
    /// Month-0 state from the starting assumptions
    ///
    /// Starting cash is held as a whole amount like every later balance.
    pub fn opening(assumptions: &Assumptions) -> Result<Self, ForecastError> {
        let cash_balance = whole(assumptions.starting_cash_balance).ok_or_else(|| {
            ForecastError::invalid("starting_cash_balance", "does not fit in a whole amount")
        })?;

        Ok(Self {
            active_accounts: assumptions.starting_accounts,
            monthly_gmv: assumptions.monthly_gmv,
            cash_balance,
            monthly_expenses: assumptions.starting_monthly_expenses,
        })
    }

    /// State for the month after `month`, given that month's stored accounts and cash
    pub fn advance(
        self,
        month: u32,
        active_accounts: i64,
        cash_balance: i64,
        assumptions: &Assumptions,
    ) -> Self {
        let gmv_change =
            (self.monthly_gmv * (assumptions.growth_rate_pct / 100.0)).round_ties_even();

        let monthly_expenses = if month % QUARTER_LENGTH_MONTHS == 0 {
            self.monthly_expenses + assumptions.quarterly_expense_increase
        } else {
            self.monthly_expenses
        };

        Self {
            active_accounts,
            monthly_gmv: self.monthly_gmv + gmv_change,
            cash_balance,
            monthly_expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn opening(assumptions: &Assumptions) -> CarryState {
        CarryState::opening(assumptions).expect("opening state")
    }

    #[test]
    fn test_opening_state() {
        let state = opening(&Assumptions::default());
        assert_eq!(state.active_accounts, 65);
        assert_eq!(state.cash_balance, 1_400_000);
        assert_relative_eq!(state.monthly_gmv, 250_000.0);
        assert_relative_eq!(state.monthly_expenses, 150_000.0);
    }

    #[test]
    fn test_opening_cash_rounds_to_whole() {
        let assumptions = Assumptions {
            starting_cash_balance: 1_000.5,
            ..Default::default()
        };
        assert_eq!(opening(&assumptions).cash_balance, 1_000);
    }

    #[test]
    fn test_opening_cash_out_of_range() {
        let assumptions = Assumptions {
            starting_cash_balance: 1e19,
            ..Default::default()
        };
        let err = CarryState::opening(&assumptions).unwrap_err();
        assert!(err.to_string().contains("starting_cash_balance"));
    }

    #[test]
    fn test_gmv_growth_is_rounded() {
        let assumptions = Assumptions {
            monthly_gmv: 1_001.0,
            growth_rate_pct: 5.0,
            ..Default::default()
        };
        let state = opening(&assumptions).advance(1, 65, 0, &assumptions);
        // 1001 * 5% = 50.05, rounded to 50
        assert_relative_eq!(state.monthly_gmv, 1_051.0);
    }

    #[test]
    fn test_expenses_step_after_quarter_end() {
        let assumptions = Assumptions::default();
        let mut state = opening(&assumptions);

        for month in 1..=2 {
            state = state.advance(month, 65, 0, &assumptions);
            assert_relative_eq!(state.monthly_expenses, 150_000.0);
        }
        state = state.advance(3, 65, 0, &assumptions);
        assert_relative_eq!(state.monthly_expenses, 170_000.0);
    }

    #[test]
    fn test_carries_stored_values() {
        let assumptions = Assumptions::default();
        let state = opening(&assumptions).advance(1, 74, 1_368_720, &assumptions);
        assert_eq!(state.active_accounts, 74);
        assert_eq!(state.cash_balance, 1_368_720);
        assert_relative_eq!(state.monthly_gmv, 247_500.0);
    }
}
