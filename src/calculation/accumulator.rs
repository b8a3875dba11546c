//! Cumulative withholding of individual income tax.
//!
//! Tax is withheld on the year-to-date taxable salary: each month the tax
//! due on the cumulative amount is computed from the bracket table and the
//! tax already withheld is subtracted.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{TaxBracketTable, YearTaxRate};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, MonthSettlement};

use super::rounding::{checked_percent_of, round2};

/// Finds the bracket covering a cumulative taxable salary.
///
/// Returns the first bracket where `salary_min < taxable` and either
/// `taxable <= salary_max` or the bracket is unbounded.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::find_bracket;
/// use tax_engine::config::{TaxBracketTable, YearTaxRate};
/// use rust_decimal::Decimal;
///
/// let table = TaxBracketTable::new(vec![
///     YearTaxRate {
///         salary_min: Decimal::ZERO,
///         salary_max: Decimal::new(3000, 0),
///         rate: Decimal::new(3, 0),
///         deducted_amount: Decimal::ZERO,
///     },
///     YearTaxRate {
///         salary_min: Decimal::new(3000, 0),
///         salary_max: Decimal::new(12000, 0),
///         rate: Decimal::new(10, 0),
///         deducted_amount: Decimal::new(210, 0),
///     },
/// ]);
///
/// let bracket = find_bracket(&table, Decimal::new(5000, 0)).unwrap();
/// assert_eq!(bracket.rate, Decimal::new(10, 0));
/// assert!(find_bracket(&table, Decimal::new(20000, 0)).is_none());
/// ```
pub fn find_bracket(table: &TaxBracketTable, taxable: Decimal) -> Option<&YearTaxRate> {
    table.brackets().iter().find(|bracket| bracket.covers(taxable))
}

/// The amounts of one month that matter for withholding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthInput {
    /// Gross salary.
    pub salary: Decimal,
    /// Taxable subsidies.
    pub subsidy_amount: Decimal,
    /// Employee social insurance.
    pub insurances: Decimal,
    /// Employee housing fund.
    pub accumulation_fund: Decimal,
    /// Monthly tax-free threshold.
    pub threshold: Decimal,
    /// Special additional deductions.
    pub deductible_amount: Decimal,
}

/// The result of settling one month, including the audit step.
#[derive(Debug, Clone)]
pub struct SettlementResult {
    /// The settled amounts and running totals.
    pub settlement: MonthSettlement,
    /// The audit step recording this settlement.
    pub audit_step: AuditStep,
}

/// Running year-to-date totals for cumulative withholding.
///
/// Months must be settled in calendar order; the accumulator is not reset
/// between calls.
#[derive(Debug, Clone)]
pub struct TaxAccumulator<'a> {
    table: &'a TaxBracketTable,
    total_salaries: Decimal,
    total_tax_salaries: Decimal,
    total_taxation: Decimal,
}

impl<'a> TaxAccumulator<'a> {
    /// Starts a new tax year on the given bracket table.
    pub fn new(table: &'a TaxBracketTable) -> Self {
        Self {
            table,
            total_salaries: Decimal::ZERO,
            total_tax_salaries: Decimal::ZERO,
            total_taxation: Decimal::ZERO,
        }
    }

    /// Year-to-date net salary.
    pub fn total_salaries(&self) -> Decimal {
        self.total_salaries
    }

    /// Year-to-date positive taxable salary.
    pub fn total_tax_salaries(&self) -> Decimal {
        self.total_tax_salaries
    }

    /// Year-to-date tax.
    pub fn total_taxation(&self) -> Decimal {
        self.total_taxation
    }

    /// Settles one month and advances the running totals.
    ///
    /// When the net salary minus deductions does not exceed the threshold
    /// the month owes no tax and no bracket is looked up.
    ///
    /// # Errors
    ///
    /// - `NoApplicableBracket` if tax is due but no bracket covers the
    ///   cumulative taxable salary
    /// - `AmountOverflow` if the amounts are too large to add up; the running
    ///   totals are left untouched
    pub fn settle_month(
        &mut self,
        month: u32,
        input: &MonthInput,
    ) -> EngineResult<SettlementResult> {
        let overflow = || EngineError::AmountOverflow { month };

        let net_salary = input
            .salary
            .checked_add(input.subsidy_amount)
            .and_then(|v| v.checked_sub(input.insurances))
            .and_then(|v| v.checked_sub(input.accumulation_fund))
            .map(round2)
            .ok_or_else(overflow)?;
        let taxable_salary = net_salary
            .checked_sub(input.threshold)
            .and_then(|v| v.checked_sub(input.deductible_amount))
            .ok_or_else(overflow)?;

        let total_salaries = self
            .total_salaries
            .checked_add(net_salary)
            .ok_or_else(overflow)?;
        let total_tax_salaries = if taxable_salary > Decimal::ZERO {
            self.total_tax_salaries
                .checked_add(taxable_salary)
                .ok_or_else(overflow)?
        } else {
            self.total_tax_salaries
        };

        let audit_input = serde_json::json!({
            "salary": input.salary.to_string(),
            "subsidy_amount": input.subsidy_amount.to_string(),
            "insurances": input.insurances.to_string(),
            "accumulation_fund": input.accumulation_fund.to_string(),
            "threshold": input.threshold.to_string(),
            "deductible_amount": input.deductible_amount.to_string(),
            "cumulative_taxable_salary": total_tax_salaries.to_string(),
            "taxation_already_withheld": self.total_taxation.to_string()
        });

        if taxable_salary <= Decimal::ZERO {
            debug!(month, %net_salary, "Below threshold, no tax due");
            self.total_salaries = total_salaries;
            self.total_tax_salaries = total_tax_salaries;

            let audit_step = AuditStep {
                step_number: month,
                rule_id: "progressive_tax".to_string(),
                rule_name: "Cumulative Withholding".to_string(),
                input: audit_input,
                output: serde_json::json!({
                    "taxation": "0",
                    "bracket_applied": false
                }),
                reasoning: format!(
                    "Net salary {} minus deductions {} does not exceed threshold {}, no tax due",
                    net_salary, input.deductible_amount, input.threshold
                ),
            };
            let settlement =
                self.settlement(net_salary, taxable_salary, Decimal::ZERO, net_salary, None);
            return Ok(SettlementResult {
                settlement,
                audit_step,
            });
        }

        let cumulative = total_tax_salaries;
        let bracket = *find_bracket(self.table, cumulative)
            .ok_or(EngineError::NoApplicableBracket { taxable: cumulative })?;

        let withheld = self.total_taxation;
        let taxation = checked_percent_of(cumulative, bracket.rate)
            .and_then(|v| v.checked_sub(bracket.deducted_amount))
            .and_then(|v| v.checked_sub(withheld))
            .map(round2)
            .ok_or_else(overflow)?;
        let total_taxation = withheld.checked_add(taxation).ok_or_else(overflow)?;
        let rest_salary = net_salary.checked_sub(taxation).ok_or_else(overflow)?;

        self.total_salaries = total_salaries;
        self.total_tax_salaries = total_tax_salaries;
        self.total_taxation = total_taxation;

        debug!(month, %cumulative, rate = %bracket.rate, %taxation, "Settled month");

        let audit_step = AuditStep {
            step_number: month,
            rule_id: "progressive_tax".to_string(),
            rule_name: "Cumulative Withholding".to_string(),
            input: audit_input,
            output: serde_json::json!({
                "taxation": taxation.to_string(),
                "bracket_applied": true,
                "rate": bracket.rate.to_string(),
                "deducted_amount": bracket.deducted_amount.to_string()
            }),
            reasoning: format!(
                "{} x {}% - {} - {} already withheld = {}",
                cumulative.normalize(),
                bracket.rate.normalize(),
                bracket.deducted_amount.normalize(),
                withheld.normalize(),
                taxation
            ),
        };

        Ok(SettlementResult {
            settlement: self.settlement(
                net_salary,
                taxable_salary,
                taxation,
                rest_salary,
                Some(bracket),
            ),
            audit_step,
        })
    }

    fn settlement(
        &self,
        net_salary: Decimal,
        taxable_salary: Decimal,
        taxation: Decimal,
        rest_salary: Decimal,
        bracket: Option<YearTaxRate>,
    ) -> MonthSettlement {
        MonthSettlement {
            net_salary,
            taxable_salary,
            taxation,
            rest_salary,
            bracket,
            history_salary: round2(self.total_salaries),
            history_taxable_salary: round2(self.total_tax_salaries),
            history_taxation: round2(self.total_taxation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(min: &str, max: &str, rate: &str, deducted: &str) -> YearTaxRate {
        YearTaxRate {
            salary_min: dec(min),
            salary_max: dec(max),
            rate: dec(rate),
            deducted_amount: dec(deducted),
        }
    }

    fn small_table() -> TaxBracketTable {
        TaxBracketTable::new(vec![
            bracket("0", "3000", "3", "0"),
            bracket("3000", "12000", "10", "210"),
        ])
    }

    fn yearly_table() -> TaxBracketTable {
        TaxBracketTable::new(vec![
            bracket("0", "36000", "3", "0"),
            bracket("36000", "144000", "10", "2520"),
            bracket("144000", "300000", "20", "16920"),
            bracket("300000", "420000", "25", "31920"),
            bracket("420000", "660000", "30", "52920"),
            bracket("660000", "960000", "35", "85920"),
            bracket("960000", "0", "45", "181920"),
        ])
    }

    fn input(salary: &str) -> MonthInput {
        MonthInput {
            salary: dec(salary),
            threshold: dec("5000"),
            ..MonthInput::default()
        }
    }

    #[test]
    fn test_cumulative_5000_in_second_bracket() {
        let table = small_table();
        let mut acc = TaxAccumulator::new(&table);

        let result = acc.settle_month(1, &input("10000")).unwrap();

        // 5000 x 10% - 210 = 290
        assert_eq!(result.settlement.taxation, dec("290"));
        assert_eq!(result.settlement.rest_salary, dec("9710"));
        assert_eq!(result.settlement.bracket.unwrap().rate, dec("10"));
        assert_eq!(acc.total_taxation(), dec("290"));
    }

    #[test]
    fn test_taxable_exactly_at_threshold_plus_deduction_is_zero() {
        let table = small_table();
        let mut acc = TaxAccumulator::new(&table);
        let month = MonthInput {
            salary: dec("6000"),
            threshold: dec("5000"),
            deductible_amount: dec("1000"),
            ..MonthInput::default()
        };

        let result = acc.settle_month(1, &month).unwrap();

        assert_eq!(result.settlement.taxation, Decimal::ZERO);
        assert!(result.settlement.bracket.is_none());
        assert_eq!(result.settlement.rest_salary, dec("6000"));
        assert_eq!(
            result.audit_step.output["bracket_applied"].as_bool(),
            Some(false)
        );
    }

    #[test]
    fn test_below_threshold_still_counts_salary() {
        let table = small_table();
        let mut acc = TaxAccumulator::new(&table);

        let result = acc.settle_month(1, &input("4000")).unwrap();

        assert_eq!(result.settlement.taxable_salary, dec("-1000"));
        assert_eq!(result.settlement.history_salary, dec("4000"));
        assert_eq!(result.settlement.history_taxable_salary, Decimal::ZERO);
        assert_eq!(acc.total_tax_salaries(), Decimal::ZERO);
    }

    #[test]
    fn test_tax_already_withheld_is_subtracted() {
        let table = yearly_table();
        let mut acc = TaxAccumulator::new(&table);
        let month = MonthInput {
            salary: dec("20000"),
            insurances: dec("2043"),
            accumulation_fund: dec("2400"),
            threshold: dec("5000"),
            deductible_amount: dec("1000"),
            ..MonthInput::default()
        };

        let taxes: Vec<Decimal> = (1..=5)
            .map(|m| acc.settle_month(m, &month).unwrap().settlement.taxation)
            .collect();

        // 9557 taxable per month; month 4 crosses into the 10% bracket
        assert_eq!(
            taxes,
            vec![
                dec("286.71"),
                dec("286.71"),
                dec("286.71"),
                dec("442.67"),
                dec("955.70")
            ]
        );
        assert_eq!(acc.total_taxation(), dec("2258.50"));
    }

    #[test]
    fn test_history_totals_equal_sum_of_months() {
        let table = yearly_table();
        let mut acc = TaxAccumulator::new(&table);

        let mut settlements = Vec::new();
        for (m, salary) in ["8000", "4000", "30000", "12000.55"].iter().enumerate() {
            let result = acc.settle_month(m as u32 + 1, &input(salary)).unwrap();
            settlements.push(result.settlement);
        }

        let last = settlements.last().unwrap();
        let taxation: Decimal = settlements.iter().map(|s| s.taxation).sum();
        let salaries: Decimal = settlements.iter().map(|s| s.net_salary).sum();
        assert_eq!(last.history_taxation, taxation);
        assert_eq!(last.history_salary, salaries);
    }

    #[test]
    fn test_no_bracket_for_income_beyond_bounded_table() {
        let table = small_table();
        let mut acc = TaxAccumulator::new(&table);

        let result = acc.settle_month(1, &input("20000"));

        match result {
            Err(EngineError::NoApplicableBracket { taxable }) => {
                assert_eq!(taxable, dec("15000"))
            }
            other => panic!("Expected NoApplicableBracket, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_salary_is_an_error_not_a_panic() {
        let table = yearly_table();
        let mut acc = TaxAccumulator::new(&table);

        let result = acc.settle_month(1, &input("10000000000000000000000000000"));

        assert!(matches!(result, Err(EngineError::AmountOverflow { month: 1 })));
        assert_eq!(acc.total_salaries(), Decimal::ZERO);
        assert_eq!(acc.total_tax_salaries(), Decimal::ZERO);
        assert_eq!(acc.total_taxation(), Decimal::ZERO);
    }

    #[test]
    fn test_subsidy_is_taxable() {
        let table = small_table();
        let mut acc = TaxAccumulator::new(&table);
        let month = MonthInput {
            salary: dec("6000"),
            subsidy_amount: dec("1000"),
            threshold: dec("5000"),
            ..MonthInput::default()
        };

        let result = acc.settle_month(1, &month).unwrap();

        // 2000 x 3% = 60
        assert_eq!(result.settlement.taxation, dec("60.00"));
    }

    #[test]
    fn test_audit_reasoning_explains_calculation() {
        let table = small_table();
        let mut acc = TaxAccumulator::new(&table);

        let result = acc.settle_month(7, &input("10000")).unwrap();

        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "progressive_tax");
        assert!(result.audit_step.reasoning.contains("5000 x 10%"));
        assert!(result.audit_step.reasoning.contains("210"));
        assert_eq!(
            result.audit_step.input["cumulative_taxable_salary"].as_str(),
            Some("5000")
        );
    }
}
