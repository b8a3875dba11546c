//! Configuration types for contribution and tax calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the global rate configuration file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::MAX_AMOUNT;

/// Contribution bounds and rates for one social insurance category.
///
/// Rates are percentages, so `8` means 8% of the base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBase {
    /// The lowest base contributions are computed on.
    pub min_base: Decimal,
    /// The highest base contributions are computed on.
    pub max_base: Decimal,
    /// The employee's share, in percent.
    pub private_rate: Decimal,
    /// The employer's share, in percent.
    pub company_rate: Decimal,
    /// A fixed amount added to the employee's share (e.g. 3 yuan for serious illness).
    #[serde(default)]
    pub extra_payment: Decimal,
}

impl RateBase {
    /// Checks that the bounds are ordered and the rates are percentages.
    pub fn validate(&self, table: &str) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidRateTable {
            table: table.to_string(),
            message,
        };

        if self.min_base < Decimal::ZERO {
            return Err(invalid(format!("min_base {} is negative", self.min_base)));
        }
        if self.min_base > self.max_base {
            return Err(invalid(format!(
                "min_base {} exceeds max_base {}",
                self.min_base, self.max_base
            )));
        }
        if self.max_base > MAX_AMOUNT {
            return Err(invalid(format!("max_base {} exceeds {}", self.max_base, MAX_AMOUNT)));
        }
        for (name, rate) in [
            ("private_rate", self.private_rate),
            ("company_rate", self.company_rate),
        ] {
            if !is_percentage(rate) {
                return Err(invalid(format!("{} {} is not within 0..=100", name, rate)));
            }
        }
        if self.extra_payment < Decimal::ZERO || self.extra_payment > MAX_AMOUNT {
            return Err(invalid(format!(
                "extra_payment {} is not within 0..={}",
                self.extra_payment, MAX_AMOUNT
            )));
        }
        Ok(())
    }
}

/// Rate tables for every social insurance category.
///
/// The pension and unemployment categories come in two variants; which one
/// applies depends on the person's endowment and residence types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancesBase {
    /// Basic pension for enterprise workers.
    pub workers_endowment: RateBase,
    /// Basic pension for government and public institution staff.
    pub office_endowment: RateBase,
    /// Basic medical insurance.
    pub medical: RateBase,
    /// Unemployment insurance for non-agricultural residence.
    pub non_agricultural_unemployment: RateBase,
    /// Unemployment insurance for agricultural residence.
    pub agricultural_unemployment: RateBase,
    /// Employment injury insurance.
    pub employment_injury: RateBase,
    /// Maternity insurance.
    pub birth: RateBase,
    /// Serious illness medical insurance.
    pub serious_medical: RateBase,
}

impl InsurancesBase {
    /// Validates every category table.
    pub fn validate(&self) -> EngineResult<()> {
        self.workers_endowment.validate("workers_endowment")?;
        self.office_endowment.validate("office_endowment")?;
        self.medical.validate("medical")?;
        self.non_agricultural_unemployment
            .validate("non_agricultural_unemployment")?;
        self.agricultural_unemployment
            .validate("agricultural_unemployment")?;
        self.employment_injury.validate("employment_injury")?;
        self.birth.validate("birth")?;
        self.serious_medical.validate("serious_medical")
    }
}

/// Housing fund bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulationFundBase {
    /// The lowest accepted base.
    pub min_base: Decimal,
    /// The highest base; larger salaries are capped to it.
    pub max_base: Decimal,
    /// The lowest accepted rate, in percent.
    pub min_rate: Decimal,
    /// The highest accepted rate, in percent.
    pub max_rate: Decimal,
}

impl AccumulationFundBase {
    /// Checks that the bounds and the rate range are ordered.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidRateTable {
            table: "accumulation_fund".to_string(),
            message,
        };

        if self.min_base < Decimal::ZERO
            || self.min_base > self.max_base
            || self.max_base > MAX_AMOUNT
        {
            return Err(invalid(format!(
                "base range {}..={} is not valid",
                self.min_base, self.max_base
            )));
        }
        if !is_percentage(self.min_rate)
            || !is_percentage(self.max_rate)
            || self.min_rate > self.max_rate
        {
            return Err(invalid(format!(
                "rate range {}..={} is not valid",
                self.min_rate, self.max_rate
            )));
        }
        Ok(())
    }
}

/// One bracket of the cumulative yearly tax table.
///
/// A `salary_max` of zero marks the unbounded top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTaxRate {
    /// Exclusive lower bound of cumulative taxable salary.
    pub salary_min: Decimal,
    /// Inclusive upper bound, or zero for no upper bound.
    pub salary_max: Decimal,
    /// Marginal rate, in percent.
    pub rate: Decimal,
    /// Quick deduction subtracted from the gross bracket tax.
    pub deducted_amount: Decimal,
}

impl YearTaxRate {
    /// Returns true if the bracket has no upper bound.
    pub fn is_unbounded(&self) -> bool {
        self.salary_max.is_zero()
    }

    /// Returns true if `taxable` falls inside `(salary_min, salary_max]`.
    pub fn covers(&self, taxable: Decimal) -> bool {
        taxable > self.salary_min && (self.is_unbounded() || taxable <= self.salary_max)
    }
}

/// The ordered list of yearly tax brackets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxBracketTable(Vec<YearTaxRate>);

impl TaxBracketTable {
    /// Creates a table from brackets in ascending order.
    pub fn new(brackets: Vec<YearTaxRate>) -> Self {
        Self(brackets)
    }

    /// Returns the brackets in order.
    pub fn brackets(&self) -> &[YearTaxRate] {
        &self.0
    }

    /// Checks that the brackets start at zero, are contiguous and ascending,
    /// and that only the last bracket may be unbounded.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |index: usize, message: String| EngineError::InvalidBracketTable {
            index,
            message,
        };

        let Some(first) = self.0.first() else {
            return Err(invalid(0, "the table has no brackets".to_string()));
        };
        if !first.salary_min.is_zero() {
            return Err(invalid(
                0,
                format!("salary_min {} must be 0", first.salary_min),
            ));
        }

        let last_index = self.0.len() - 1;
        for (index, bracket) in self.0.iter().enumerate() {
            if !is_percentage(bracket.rate) {
                return Err(invalid(
                    index,
                    format!("rate {} is not within 0..=100", bracket.rate),
                ));
            }
            if bracket.is_unbounded() {
                if index != last_index {
                    return Err(invalid(
                        index,
                        "only the last bracket may be unbounded".to_string(),
                    ));
                }
            } else if bracket.salary_max <= bracket.salary_min {
                return Err(invalid(
                    index,
                    format!(
                        "salary_max {} must exceed salary_min {}",
                        bracket.salary_max, bracket.salary_min
                    ),
                ));
            }
            if index > 0 {
                let previous = &self.0[index - 1];
                if bracket.salary_min != previous.salary_max {
                    return Err(invalid(
                        index,
                        format!(
                            "salary_min {} does not continue from previous salary_max {}",
                            bracket.salary_min, previous.salary_max
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// The global rate configuration (`tax.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Housing fund bounds.
    pub accumulation_fund: AccumulationFundBase,
    /// Social insurance tables.
    pub insurances: InsurancesBase,
    /// Cumulative yearly tax brackets.
    pub year_tax_rates: TaxBracketTable,
}

impl TaxConfig {
    /// Validates every table of the configuration.
    pub fn validate(&self) -> EngineResult<()> {
        self.accumulation_fund.validate()?;
        self.insurances.validate()?;
        self.year_tax_rates.validate()
    }
}

fn is_percentage(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE_HUNDRED
}
