//! Month-by-month salary, contribution and tax calculation.
//!
//! Each month's housing fund and social insurance are computed from the
//! rate tables, the employee shares are deducted, and the remainder is
//! settled in a [`TaxAccumulator`].

use std::iter;

use rust_decimal::Decimal;
use tracing::info;

use crate::config::TaxConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, MonthlyTax, MonthlyTaxes, Salaries, SalaryBase,
};

use super::accumulator::{MonthInput, TaxAccumulator};
use super::fund::calculate_fund;
use super::insurance::calculate_insurances;

/// Months in a tax year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Expands a month list to the months that will be settled.
///
/// With `project_full_year` the last entry is repeated up to December.
pub(crate) fn plan_months<T>(entries: &[T], project_full_year: bool) -> EngineResult<Vec<&T>> {
    let last = entries.last().ok_or(EngineError::EmptySalaries)?;
    if entries.len() > MONTHS_PER_YEAR {
        return Err(EngineError::TooManyMonths {
            count: entries.len(),
        });
    }

    let projected = if project_full_year {
        MONTHS_PER_YEAR - entries.len()
    } else {
        0
    };

    Ok(entries
        .iter()
        .chain(iter::repeat_n(last, projected))
        .collect())
}

/// Calculates every month of a salary list.
///
/// # Errors
///
/// - `EmptySalaries` / `TooManyMonths` for a month list outside 1..=12
/// - any housing fund or insurance error of an individual month
/// - `NoApplicableBracket` if the bracket table does not cover the income
pub fn calculate_monthly_taxes(
    config: &TaxConfig,
    salaries: &Salaries,
) -> EngineResult<MonthlyTaxes> {
    let months = plan_months(&salaries.monthly_salaries, salaries.project_full_year)?;

    let mut accumulator = TaxAccumulator::new(&config.year_tax_rates);
    let mut audit_trace = AuditTrace::default();
    let mut taxes = Vec::with_capacity(months.len());
    let mut history_insurances = Decimal::ZERO;
    let mut history_accumulation_fund = Decimal::ZERO;

    for (index, salary) in months.into_iter().enumerate() {
        let month = index as u32 + 1;
        let (mut tax, audit_step) =
            calculate_month(config, salaries, salary, month, &mut accumulator)?;

        history_insurances += tax.insurances;
        history_accumulation_fund += tax.accumulation_fund;
        tax.history_insurances = history_insurances;
        tax.history_accumulation_fund = history_accumulation_fund;

        audit_trace.warnings.extend(
            tax.insurances_result
                .warnings
                .iter()
                .map(|w| with_month(w, month)),
        );
        audit_trace.steps.push(audit_step);
        taxes.push(tax);
    }

    info!(
        months = taxes.len(),
        total_taxation = %accumulator.total_taxation(),
        "Calculated monthly taxes"
    );

    Ok(MonthlyTaxes { taxes, audit_trace })
}

fn calculate_month(
    config: &TaxConfig,
    salaries: &Salaries,
    salary: &SalaryBase,
    month: u32,
    accumulator: &mut TaxAccumulator<'_>,
) -> EngineResult<(MonthlyTax, AuditStep)> {
    let fund = calculate_fund(&config.accumulation_fund, salary)?;
    let insurances_result = calculate_insurances(
        &config.insurances,
        salaries.residence,
        salaries.endowment,
        salary,
    )?;

    let insurances = insurances_result.private_total;
    let accumulation_fund = fund.private_fund;

    let settled = accumulator.settle_month(
        month,
        &MonthInput {
            salary: salary.salary,
            subsidy_amount: salary.subsidy_amount,
            insurances,
            accumulation_fund,
            threshold: salary.threshold,
            deductible_amount: salary.deductible_amount,
        },
    )?;

    let tax = MonthlyTax {
        month,
        salary: salary.clone(),
        accumulation_fund_result: fund,
        insurances_result,
        insurances,
        accumulation_fund,
        settlement: settled.settlement,
        history_insurances: Decimal::ZERO,
        history_accumulation_fund: Decimal::ZERO,
    };
    Ok((tax, settled.audit_step))
}

fn with_month(warning: &AuditWarning, month: u32) -> AuditWarning {
    AuditWarning {
        message: format!("month {}: {}", month, warning.message),
        ..warning.clone()
    }
}
