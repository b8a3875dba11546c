//! `year` command.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::calculation::calculate_year_taxes;
use crate::config::TaxConfig;
use crate::models::{YearPlan, YearTaxes};

use super::{OutputFormat, read_input, write_json};

/// Calculate a year of tax from a simplified plan with flat contributions.
#[derive(Args, Debug, Clone)]
pub struct YearCommand {
    /// Yearly plan file (YAML or JSON)
    #[arg(short = 'c', long = "subc", default_value = "year.yaml")]
    pub plan: PathBuf,
}

impl YearCommand {
    /// Runs the command and writes the report to `out`.
    ///
    /// Only the bracket table of `config` is used.
    pub fn exec(
        &self,
        config: &TaxConfig,
        format: OutputFormat,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let plan: YearPlan = read_input(&self.plan, "yearly plan")?;
        let result = calculate_year_taxes(&config.year_tax_rates, &plan)?;

        match format {
            OutputFormat::Json => write_json(&result, out),
            OutputFormat::Text => Ok(render(&result, out)?),
        }
    }
}

/// Writes one line per month with the running totals.
///
/// The salary column is the month's salary after tax.
pub fn render(result: &YearTaxes, out: &mut impl Write) -> io::Result<()> {
    for tax in &result.taxes {
        let settlement = &tax.settlement;
        writeln!(
            out,
            "{:02}, tax: {:.2}, total tax: {:.2}, salary: {:.2}, total salary: {:.2}",
            tax.month,
            settlement.taxation,
            settlement.history_taxation,
            settlement.rest_salary,
            settlement.history_salary,
        )?;
    }
    Ok(())
}
