//! Core data models for the tax engine.
//!
//! This module contains the personal inputs and the calculation results.

mod audit;
mod contribution;
mod monthly_tax;
mod personal;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use contribution::{
    CategoryContribution, FundResult, InsuranceCategory, InsuranceResult, ShareAmounts,
};
pub use monthly_tax::{MonthSettlement, MonthlyTax, MonthlyTaxes, YearMonthlyTax, YearTaxes};
pub use personal::{
    DEFAULT_THRESHOLD, EndowmentType, InsurancesAndFund, MAX_AMOUNT, MonthSalary, PersonalInfo,
    ResidenceType, SalaryBase, Salaries, YearGlobal, YearPlan,
};
