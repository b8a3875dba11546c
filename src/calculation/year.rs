//! Simplified yearly plan.
//!
//! Unlike the `tax` command, contributions are not computed from the rate
//! tables: each month either states its insurance and housing fund or they
//! are derived from the flat settings in the plan's `global` block.

use rust_decimal::Decimal;
use tracing::info;

use crate::config::TaxBracketTable;
use crate::error::EngineResult;
use crate::models::{
    AuditTrace, InsurancesAndFund, MonthSalary, YearMonthlyTax, YearPlan, YearTaxes,
};

use super::accumulator::{MonthInput, TaxAccumulator};
use super::monthly::plan_months;
use super::rounding::{percent_of, round2};

/// Insurance deducted in a month: the stated amount, or
/// `insurances_base × sum of insurance rates / 100` when absent or zero.
pub fn month_insurance(month: &MonthSalary, global: &InsurancesAndFund) -> Decimal {
    stated_or(month.insurance, || {
        round2(percent_of(global.insurances_base, global.total_insurance_rate()))
    })
}

/// Housing fund deducted in a month: the stated amount, or
/// `accumulation_fund_base × accumulation_fund_rate / 100` when absent or zero.
pub fn month_accumulation_fund(month: &MonthSalary, global: &InsurancesAndFund) -> Decimal {
    stated_or(month.accumulation_fund, || {
        round2(percent_of(
            global.accumulation_fund_base,
            global.accumulation_fund_rate,
        ))
    })
}

fn stated_or(stated: Option<Decimal>, derive: impl FnOnce() -> Decimal) -> Decimal {
    match stated {
        Some(amount) if !amount.is_zero() => amount,
        _ => derive(),
    }
}

/// Calculates every month of a yearly plan.
///
/// # Errors
///
/// - `EmptySalaries` / `TooManyMonths` for a month list outside 1..=12
/// - `InvalidPersonalInfo` if a month or the `global` block carries a
///   negative amount or one above [`MAX_AMOUNT`](crate::models::MAX_AMOUNT)
/// - `NoApplicableBracket` if the bracket table does not cover the income
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::calculate_year_taxes;
/// use tax_engine::config::{TaxBracketTable, YearTaxRate};
/// use tax_engine::models::YearPlan;
/// use rust_decimal::Decimal;
///
/// let table = TaxBracketTable::new(vec![YearTaxRate {
///     salary_min: Decimal::ZERO,
///     salary_max: Decimal::ZERO,
///     rate: Decimal::new(3, 0),
///     deducted_amount: Decimal::ZERO,
/// }]);
/// let plan: YearPlan = serde_json::from_str(
///     r#"{"salaries": [{"salary": "8000", "insurance": "1000", "accumulation_fund": "1000"}]}"#,
/// ).unwrap();
///
/// let result = calculate_year_taxes(&table, &plan).unwrap();
/// // (8000 - 2000 - 5000) x 3%
/// assert_eq!(result.taxes[0].settlement.taxation, Decimal::new(3000, 2));
/// ```
pub fn calculate_year_taxes(table: &TaxBracketTable, plan: &YearPlan) -> EngineResult<YearTaxes> {
    let months = plan_months(&plan.salaries, plan.global.project_full_year)?;
    let global = &plan.global.contributions;
    global.validate()?;

    let mut accumulator = TaxAccumulator::new(table);
    let mut audit_trace = AuditTrace::default();
    let mut taxes = Vec::with_capacity(months.len());

    for (index, month_salary) in months.into_iter().enumerate() {
        month_salary.validate()?;

        let month = index as u32 + 1;
        let insurance = month_insurance(month_salary, global);
        let accumulation_fund = month_accumulation_fund(month_salary, global);

        let settled = accumulator.settle_month(
            month,
            &MonthInput {
                salary: month_salary.salary,
                subsidy_amount: month_salary.subsidy_amount,
                insurances: insurance,
                accumulation_fund,
                threshold: month_salary.threshold,
                deductible_amount: month_salary.deductible_amount,
            },
        )?;

        audit_trace.steps.push(settled.audit_step);
        taxes.push(YearMonthlyTax {
            month,
            month_salary: month_salary.clone(),
            insurance,
            accumulation_fund,
            settlement: settled.settlement,
        });
    }

    info!(
        months = taxes.len(),
        total_taxation = %accumulator.total_taxation(),
        "Calculated yearly plan"
    );

    Ok(YearTaxes { taxes, audit_trace })
}
