//! `tax` command.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::calculation::calculate_monthly_taxes;
use crate::config::TaxConfig;
use crate::models::{MonthlyTaxes, Salaries};

use super::{OutputFormat, read_input, write_json};

/// Calculate monthly tax, insurance and housing fund from a salary list.
#[derive(Args, Debug, Clone)]
pub struct TaxCommand {
    /// Monthly salaries file (YAML or JSON)
    #[arg(short = 'c', long = "subc", default_value = "salaries.yaml")]
    pub salaries: PathBuf,
}

impl TaxCommand {
    /// Runs the command and writes the report to `out`.
    pub fn exec(
        &self,
        config: &TaxConfig,
        format: OutputFormat,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let salaries: Salaries = read_input(&self.salaries, "salaries")?;
        let result = calculate_monthly_taxes(config, &salaries)?;

        match format {
            OutputFormat::Json => write_json(&result, out),
            OutputFormat::Text => Ok(render(&result, out)?),
        }
    }
}

/// Writes one line per month.
pub fn render(result: &MonthlyTaxes, out: &mut impl Write) -> io::Result<()> {
    for tax in &result.taxes {
        writeln!(
            out,
            "{:>2}, salary: {:>10.2}, subsidy: {:>10.2}, insurance: {:.2}, housing fund: {:.2}, \
             tax: {:>10.2}, after tax: {:>10.2}",
            tax.month,
            tax.salary.salary,
            tax.salary.subsidy_amount,
            tax.insurances,
            tax.accumulation_fund,
            tax.settlement.taxation,
            tax.settlement.rest_salary,
        )?;
    }
    Ok(())
}
