//! Monthly tax results.
//!
//! A [`MonthSettlement`] is what the bracket accumulator produces for one
//! month; the `tax` and `year` commands wrap it with their own inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::YearTaxRate;

use super::{AuditTrace, FundResult, InsuranceResult, MonthSalary, SalaryBase};

/// One month settled against the cumulative bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSettlement {
    /// Salary plus subsidy minus insurance and housing fund, before tax.
    pub net_salary: Decimal,
    /// Net salary minus threshold and deductions (may be negative).
    pub taxable_salary: Decimal,
    /// Tax withheld this month.
    pub taxation: Decimal,
    /// Net salary minus tax.
    pub rest_salary: Decimal,
    /// The bracket the cumulative taxable salary fell into, if tax was due.
    pub bracket: Option<YearTaxRate>,
    /// Year-to-date net salary.
    pub history_salary: Decimal,
    /// Year-to-date positive taxable salary.
    pub history_taxable_salary: Decimal,
    /// Year-to-date tax.
    pub history_taxation: Decimal,
}

/// One month of the `tax` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTax {
    /// Calendar month, 1 to 12.
    pub month: u32,
    /// The salary inputs of this month.
    #[serde(flatten)]
    pub salary: SalaryBase,
    /// Housing fund breakdown.
    pub accumulation_fund_result: FundResult,
    /// Social insurance breakdown.
    pub insurances_result: InsuranceResult,
    /// Employee insurance total.
    pub insurances: Decimal,
    /// Employee housing fund.
    pub accumulation_fund: Decimal,
    /// Tax settlement.
    #[serde(flatten)]
    pub settlement: MonthSettlement,
    /// Year-to-date employee insurance.
    pub history_insurances: Decimal,
    /// Year-to-date employee housing fund.
    pub history_accumulation_fund: Decimal,
}

/// The `tax` command result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTaxes {
    /// One entry per month.
    pub taxes: Vec<MonthlyTax>,
    /// How each month's tax was reached.
    pub audit_trace: AuditTrace,
}

impl MonthlyTaxes {
    /// Tax withheld over all months.
    pub fn total_taxation(&self) -> Decimal {
        self.taxes.iter().map(|t| t.settlement.taxation).sum()
    }

    /// Salary after tax over all months.
    pub fn total_rest_salary(&self) -> Decimal {
        self.taxes.iter().map(|t| t.settlement.rest_salary).sum()
    }
}

/// One month of the `year` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonthlyTax {
    /// Calendar month, 1 to 12.
    pub month: u32,
    /// The month as planned.
    pub month_salary: MonthSalary,
    /// Insurance actually deducted (stated or derived).
    pub insurance: Decimal,
    /// Housing fund actually deducted (stated or derived).
    pub accumulation_fund: Decimal,
    /// Tax settlement.
    #[serde(flatten)]
    pub settlement: MonthSettlement,
}

/// The `year` command result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTaxes {
    /// One entry per month.
    pub taxes: Vec<YearMonthlyTax>,
    /// How each month's tax was reached.
    pub audit_trace: AuditTrace,
}
