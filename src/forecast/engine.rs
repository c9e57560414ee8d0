//! Core forecast engine

use super::records::{ForecastResult, MonthRecord, Runway};
use super::state::CarryState;
use super::{out_of_range, whole, FORECAST_MONTHS};
use crate::assumptions::Assumptions;
use crate::error::ForecastError;

/// Forecast engine for one set of validated assumptions
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    assumptions: Assumptions,
}

impl ForecastEngine {
    /// Validate assumptions and build the engine
    pub fn new(assumptions: Assumptions) -> Result<Self, ForecastError> {
        assumptions.validate()?;
        Ok(Self { assumptions })
    }

    /// Run the full twelve-month forecast
    ///
    /// Fails with `InvalidInput` when the assumptions push a stored figure
    /// outside the whole-unit range.
    pub fn run(&self) -> Result<ForecastResult, ForecastError> {
        let opening = CarryState::opening(&self.assumptions)?;

        let (_, months) = (1..=FORECAST_MONTHS).try_fold(
            (opening, Vec::with_capacity(FORECAST_MONTHS as usize)),
            |(state, mut months), month| {
                let (record, next) = self.project_month(month, state)?;
                months.push(record);
                Ok::<_, ForecastError>((next, months))
            },
        )?;

        let result = ForecastResult::from_months(months)?;
        log::debug!(
            "Forecast complete: revenue={}, accounts={}, cash={}, runway={}",
            result.kpis.total_revenue_year,
            result.kpis.ending_active_accounts,
            result.kpis.ending_cash_balance,
            result.kpis.ending_runway,
        );
        Ok(result)
    }

    /// Project a single month from the carried state
    ///
    /// Returns the month's record and the state carried into the next month.
    fn project_month(
        &self,
        month: u32,
        state: CarryState,
    ) -> Result<(MonthRecord, CarryState), ForecastError> {
        let a = &self.assumptions;
        let fit = |value: f64, figure: &'static str| {
            whole(value).ok_or_else(|| out_of_range(figure, month))
        };

        // Accounts: new accounts join, then churn applies to the combined pool
        let pool = state
            .active_accounts
            .checked_add(a.new_accounts_per_month)
            .ok_or_else(|| out_of_range("active_accounts", month))? as f64;
        let lost = pool * (a.account_churn_pct / 100.0);
        let active_unrounded = pool - lost;
        let active_accounts = fit(active_unrounded, "active_accounts")?;
        let lost_accounts = fit(lost, "lost_accounts")?;

        // Revenue uses this month's unrounded account count
        let total_revenue = fit(a.deal_size * active_unrounded, "total_revenue")?;
        let fractional_revenue = fit(
            total_revenue as f64 * (a.take_rate_pct / 100.0),
            "fractional_revenue",
        )?;
        let marketplace_revenue = fit(
            state.monthly_gmv * (a.marketplace_take_rate_pct / 100.0),
            "marketplace_revenue",
        )?;
        let net_revenue = fractional_revenue
            .checked_add(marketplace_revenue)
            .ok_or_else(|| out_of_range("net_revenue", month))?;

        // Cash moves by the stored expenses, so every row balances
        let monthly_expenses = fit(state.monthly_expenses, "monthly_expenses")?;
        let net_burn = net_revenue
            .checked_sub(monthly_expenses)
            .ok_or_else(|| out_of_range("net_burn", month))?;
        let cash_balance = state
            .cash_balance
            .checked_add(net_burn)
            .ok_or_else(|| out_of_range("cash_balance", month))?;
        let runway = Runway::from_burn(cash_balance, net_burn);

        log::debug!(
            "Month {:2}: accounts={:.4} (stored {}), lost={}, net_revenue={}, burn={}, cash={}, runway={}",
            month,
            active_unrounded,
            active_accounts,
            lost_accounts,
            net_revenue,
            net_burn,
            cash_balance,
            runway,
        );

        let record = MonthRecord {
            month,
            total_revenue,
            fractional_revenue,
            marketplace_revenue,
            net_revenue,
            active_accounts,
            lost_accounts,
            monthly_expenses,
            net_burn,
            cash_balance,
            runway,
        };

        let next = state.advance(month, active_accounts, cash_balance, a);
        Ok((record, next))
    }
}

/// Validate assumptions and run the forecast
pub fn compute_forecast(assumptions: Assumptions) -> Result<ForecastResult, ForecastError> {
    ForecastEngine::new(assumptions)?.run()
}
