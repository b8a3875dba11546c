//! Housing fund calculation.
//!
//! The base is the declared fund base or the salary, capped at the
//! configured maximum. Bases below the minimum and rates outside the
//! configured range are rejected rather than adjusted.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::AccumulationFundBase;
use crate::error::{EngineError, EngineResult};
use crate::models::{FundResult, SalaryBase};

use super::rounding::{percent_of, round_to};

const FUND_CATEGORY: &str = "accumulation_fund";

/// Housing fund amounts are whole yuan.
const FUND_DECIMAL_PLACES: u32 = 0;

/// Computes the employer and employee housing fund contributions.
///
/// Both shares are `base × rate / 100` rounded to whole yuan; the employee
/// pays the same amount as the employer.
///
/// # Errors
///
/// - `BaseBelowMinimum` if the base is under `min_base`
/// - `RateOutOfRange` if the rate is outside `min_rate..=max_rate`
/// - `InvalidPersonalInfo` if an amount is negative
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::calculate_fund;
/// use tax_engine::config::AccumulationFundBase;
/// use tax_engine::models::SalaryBase;
/// use rust_decimal::Decimal;
///
/// let bounds = AccumulationFundBase {
///     min_base: Decimal::new(2200, 0),
///     max_base: Decimal::new(27786, 0),
///     min_rate: Decimal::new(5, 0),
///     max_rate: Decimal::new(12, 0),
/// };
/// let salary = SalaryBase::from_salary(Decimal::new(20000, 0), Decimal::new(12, 0));
///
/// let result = calculate_fund(&bounds, &salary).unwrap();
/// assert_eq!(result.private_fund, Decimal::new(2400, 0));
/// ```
pub fn calculate_fund(
    bounds: &AccumulationFundBase,
    salary: &SalaryBase,
) -> EngineResult<FundResult> {
    salary.validate()?;

    let declared = salary.resolve_base(salary.accumulation_fund_base);
    let base = if declared > bounds.max_base {
        bounds.max_base
    } else if declared < bounds.min_base {
        return Err(EngineError::BaseBelowMinimum {
            category: FUND_CATEGORY.to_string(),
            base: declared,
            min_base: bounds.min_base,
        });
    } else {
        declared
    };

    let rate = salary.accumulation_fund_rate;
    if rate < bounds.min_rate || rate > bounds.max_rate {
        return Err(EngineError::RateOutOfRange {
            category: FUND_CATEGORY.to_string(),
            rate,
            min_rate: bounds.min_rate,
            max_rate: bounds.max_rate,
        });
    }

    let company_fund = fund_amount(base, rate);
    let min_fund = fund_amount(bounds.min_base, bounds.min_rate);
    let max_fund = fund_amount(bounds.max_base, bounds.max_rate);

    debug!(%declared, %base, %rate, %company_fund, "Calculated housing fund");

    Ok(FundResult {
        bounds: bounds.clone(),
        salary: salary.salary,
        base,
        rate,
        company_fund,
        private_fund: company_fund,
        min_company_fund: min_fund,
        max_company_fund: max_fund,
        min_private_fund: min_fund,
        max_private_fund: max_fund,
    })
}

fn fund_amount(base: Decimal, rate: Decimal) -> Decimal {
    round_to(percent_of(base, rate), FUND_DECIMAL_PLACES)
}
