//! Social insurance calculation.
//!
//! Every category is computed the same way: the base is clamped to the
//! category's bounds, then each share is `base × rate / 100` rounded to
//! cents. The employee share also carries the category's fixed extra
//! payment.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{InsurancesBase, RateBase};
use crate::error::EngineResult;
use crate::models::{
    AuditWarning, CategoryContribution, EndowmentType, InsuranceCategory, InsuranceResult,
    ResidenceType, SalaryBase, ShareAmounts,
};

use super::rounding::{percent_of, round2};

/// Clamps `base` into `min_base..=max_base`.
pub fn clamp_base(table: &RateBase, base: Decimal) -> Decimal {
    base.max(table.min_base).min(table.max_base)
}

/// Computes both shares of one contribution on an already-clamped base.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::contribution;
/// use tax_engine::config::RateBase;
/// use rust_decimal::Decimal;
///
/// let medical = RateBase {
///     min_base: Decimal::new(5360, 0),
///     max_base: Decimal::new(26541, 0),
///     private_rate: Decimal::new(2, 0),
///     company_rate: Decimal::new(9, 0),
///     extra_payment: Decimal::ZERO,
/// };
/// let shares = contribution(&medical, Decimal::new(20000, 0));
/// assert_eq!(shares.company, Decimal::new(1800, 0));
/// assert_eq!(shares.private, Decimal::new(400, 0));
/// ```
pub fn contribution(table: &RateBase, base: Decimal) -> ShareAmounts {
    ShareAmounts {
        company: round2(percent_of(base, table.company_rate)),
        private: round2(percent_of(base, table.private_rate) + table.extra_payment),
    }
}

/// Computes one category, recording a warning when the base was clamped.
pub fn calculate_category(
    category: InsuranceCategory,
    table: &RateBase,
    declared_base: Decimal,
    warnings: &mut Vec<AuditWarning>,
) -> CategoryContribution {
    let base = clamp_base(table, declared_base);

    if base != declared_base {
        let (code, bound) = if declared_base < table.min_base {
            ("BASE_RAISED_TO_MINIMUM", "minimum")
        } else {
            ("BASE_CAPPED_TO_MAXIMUM", "maximum")
        };
        warn!(category = category.key(), %declared_base, %base, "Insurance base clamped");
        warnings.push(AuditWarning {
            code: code.to_string(),
            message: format!(
                "{} base {} adjusted to the {} base {}",
                category.key(),
                declared_base,
                bound,
                base
            ),
            severity: "low".to_string(),
        });
    }

    CategoryContribution {
        category,
        table: table.clone(),
        declared_base,
        base,
        amount: contribution(table, base),
        min_amount: contribution(table, table.min_base),
        max_amount: contribution(table, table.max_base),
    }
}

/// Computes every social insurance category for one month.
///
/// The pension table follows `endowment`, the unemployment table follows
/// `residence`. Undeclared bases fall back to the salary.
///
/// # Errors
///
/// Returns `InvalidPersonalInfo` if an amount is negative.
pub fn calculate_insurances(
    tables: &InsurancesBase,
    residence: ResidenceType,
    endowment: EndowmentType,
    salary: &SalaryBase,
) -> EngineResult<InsuranceResult> {
    salary.validate()?;

    let endowment_table = match endowment {
        EndowmentType::Workers => &tables.workers_endowment,
        EndowmentType::Office => &tables.office_endowment,
    };
    let unemployment_table = match residence {
        ResidenceType::NonAgricultural => &tables.non_agricultural_unemployment,
        ResidenceType::Agricultural => &tables.agricultural_unemployment,
    };

    let plan = [
        (
            InsuranceCategory::Endowment,
            endowment_table,
            salary.endowment_base,
        ),
        (InsuranceCategory::Medical, &tables.medical, salary.medical_base),
        (
            InsuranceCategory::Unemployment,
            unemployment_table,
            salary.unemployment_base,
        ),
        (
            InsuranceCategory::EmploymentInjury,
            &tables.employment_injury,
            salary.employment_injury_base,
        ),
        (InsuranceCategory::Birth, &tables.birth, salary.birth_base),
        (
            InsuranceCategory::SeriousMedical,
            &tables.serious_medical,
            salary.serious_medical_base,
        ),
    ];

    let mut warnings = Vec::new();
    let contributions: Vec<CategoryContribution> = plan
        .into_iter()
        .map(|(category, table, declared)| {
            calculate_category(category, table, salary.resolve_base(declared), &mut warnings)
        })
        .collect();

    let company_total = contributions.iter().map(|c| c.amount.company).sum();
    let private_total = contributions.iter().map(|c| c.amount.private).sum();

    debug!(%company_total, %private_total, "Calculated social insurance");

    Ok(InsuranceResult {
        contributions,
        company_total,
        private_total,
        warnings,
    })
}
