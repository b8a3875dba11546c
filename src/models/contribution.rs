//! Housing fund and social insurance results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{AccumulationFundBase, RateBase};

use super::AuditWarning;

/// The social insurance categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceCategory {
    /// Basic pension.
    Endowment,
    /// Basic medical insurance.
    Medical,
    /// Unemployment insurance.
    Unemployment,
    /// Employment injury insurance.
    EmploymentInjury,
    /// Maternity insurance.
    Birth,
    /// Serious illness medical insurance.
    SeriousMedical,
}

impl InsuranceCategory {
    /// Every category, in display order.
    pub const ALL: [InsuranceCategory; 6] = [
        InsuranceCategory::Endowment,
        InsuranceCategory::Medical,
        InsuranceCategory::Unemployment,
        InsuranceCategory::EmploymentInjury,
        InsuranceCategory::Birth,
        InsuranceCategory::SeriousMedical,
    ];

    /// Returns the snake_case key used in configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            InsuranceCategory::Endowment => "endowment",
            InsuranceCategory::Medical => "medical",
            InsuranceCategory::Unemployment => "unemployment",
            InsuranceCategory::EmploymentInjury => "employment_injury",
            InsuranceCategory::Birth => "birth",
            InsuranceCategory::SeriousMedical => "serious_medical",
        }
    }
}

impl fmt::Display for InsuranceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InsuranceCategory::Endowment => "Pension",
            InsuranceCategory::Medical => "Medical",
            InsuranceCategory::Unemployment => "Unemployment",
            InsuranceCategory::EmploymentInjury => "Employment injury",
            InsuranceCategory::Birth => "Maternity",
            InsuranceCategory::SeriousMedical => "Serious illness",
        };
        f.write_str(label)
    }
}

/// Company and private shares of one contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareAmounts {
    /// Employer share.
    pub company: Decimal,
    /// Employee share.
    pub private: Decimal,
}

/// The contribution to one insurance category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryContribution {
    /// Which category this is.
    pub category: InsuranceCategory,
    /// The rate table that applied.
    pub table: RateBase,
    /// The base as declared (or the salary when not declared).
    pub declared_base: Decimal,
    /// The base after clamping to the table bounds.
    pub base: Decimal,
    /// Shares computed on `base`.
    pub amount: ShareAmounts,
    /// Shares computed on `min_base`.
    pub min_amount: ShareAmounts,
    /// Shares computed on `max_base`.
    pub max_amount: ShareAmounts,
}

/// The social insurance contributions for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceResult {
    /// One entry per category, in [`InsuranceCategory::ALL`] order.
    pub contributions: Vec<CategoryContribution>,
    /// Sum of the employer shares.
    pub company_total: Decimal,
    /// Sum of the employee shares.
    pub private_total: Decimal,
    /// Bases that had to be clamped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AuditWarning>,
}

impl InsuranceResult {
    /// Returns the contribution of one category.
    pub fn get(&self, category: InsuranceCategory) -> Option<&CategoryContribution> {
        self.contributions.iter().find(|c| c.category == category)
    }
}

/// The housing fund contribution for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundResult {
    /// The configured bounds.
    pub bounds: AccumulationFundBase,
    /// The salary the base was taken from.
    pub salary: Decimal,
    /// The base used, after capping.
    pub base: Decimal,
    /// The rate used, in percent.
    pub rate: Decimal,
    /// Employer contribution.
    pub company_fund: Decimal,
    /// Employee contribution.
    pub private_fund: Decimal,
    /// Smallest possible employer contribution.
    pub min_company_fund: Decimal,
    /// Largest possible employer contribution.
    pub max_company_fund: Decimal,
    /// Smallest possible employee contribution.
    pub min_private_fund: Decimal,
    /// Largest possible employee contribution.
    pub max_private_fund: Decimal,
}
