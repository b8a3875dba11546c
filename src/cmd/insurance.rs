//! `insurance` command.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::calculation::calculate_insurances;
use crate::config::TaxConfig;
use crate::models::{CategoryContribution, InsuranceResult, PersonalInfo};

use super::{OutputFormat, read_input, write_json};

/// Calculate social insurance from a personal information file.
#[derive(Args, Debug, Clone)]
pub struct InsuranceCommand {
    /// Personal information file (YAML or JSON)
    #[arg(short = 'c', long = "subc", default_value = "personal.yaml")]
    pub personal: PathBuf,
}

impl InsuranceCommand {
    /// Runs the command and writes the report to `out`.
    pub fn exec(
        &self,
        config: &TaxConfig,
        format: OutputFormat,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let info: PersonalInfo = read_input(&self.personal, "personal info")?;
        let result =
            calculate_insurances(&config.insurances, info.residence, info.endowment, &info.salary)?;

        match format {
            OutputFormat::Json => write_json(&result, out),
            OutputFormat::Text => Ok(render(&result, out)?),
        }
    }
}

/// Writes one entry per category followed by the totals.
pub fn render(result: &InsuranceResult, out: &mut impl Write) -> io::Result<()> {
    for contribution in &result.contributions {
        render_category(contribution, out)?;
    }
    writeln!(
        out,
        "\tcompany total: {:.2}, private total: {:.2}",
        result.company_total, result.private_total
    )
}

fn render_category(c: &CategoryContribution, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{}, min base: {:.2}, max base: {:.2}, company rate: {:.2}%, private rate: {:.2}%, \
         company min: {:.2}, company max: {:.2}, private min: {:.2}, private max: {:.2}.",
        c.category,
        c.table.min_base,
        c.table.max_base,
        c.table.company_rate,
        c.table.private_rate,
        c.min_amount.company,
        c.max_amount.company,
        c.min_amount.private,
        c.max_amount.private,
    )?;
    writeln!(
        out,
        "\t  base: {:.2}, company: {:.2}, private: {:.2}",
        c.base, c.amount.company, c.amount.private
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InsurancesBase, RateBase};
    use crate::models::{EndowmentType, ResidenceType, SalaryBase};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn table(min: &str, company: &str, private: &str) -> RateBase {
        RateBase {
            min_base: dec(min),
            max_base: dec("26541"),
            private_rate: dec(private),
            company_rate: dec(company),
            extra_payment: Decimal::ZERO,
        }
    }

    #[test]
    fn test_render_lists_every_category_and_totals() {
        let tables = InsurancesBase {
            workers_endowment: table("3613", "16", "8"),
            office_endowment: table("3613", "16", "8"),
            medical: table("5360", "9", "2"),
            non_agricultural_unemployment: table("3613", "0.8", "0.2"),
            agricultural_unemployment: table("3613", "0.8", "0"),
            employment_injury: table("4713", "0.4", "0"),
            birth: table("5360", "0.8", "0"),
            serious_medical: table("5360", "1", "0"),
        };
        let salary = SalaryBase::from_salary(dec("10000"), dec("12"));
        let result = calculate_insurances(
            &tables,
            ResidenceType::NonAgricultural,
            EndowmentType::Workers,
            &salary,
        )
        .unwrap();

        let mut out = Vec::new();
        render(&result, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Pension, min base: 3613.00, max base: 26541.00"));
        assert!(text.contains("base: 10000.00, company: 1600.00, private: 800.00"));
        assert!(text.contains("Serious illness, "));
        assert!(text.ends_with("\tcompany total: 2800.00, private total: 1020.00\n"));
        assert_eq!(text.lines().count(), 13);
    }
}
