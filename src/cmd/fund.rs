//! `accumulation-fund` command.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::calculation::calculate_fund;
use crate::config::TaxConfig;
use crate::models::{FundResult, PersonalInfo};

use super::{OutputFormat, read_input, write_json};

/// Calculate the housing fund from a personal information file.
#[derive(Args, Debug, Clone)]
pub struct FundCommand {
    /// Personal information file (YAML or JSON)
    #[arg(short = 'c', long = "subc", default_value = "personal.yaml")]
    pub personal: PathBuf,
}

impl FundCommand {
    /// Runs the command and writes the report to `out`.
    pub fn exec(
        &self,
        config: &TaxConfig,
        format: OutputFormat,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let info: PersonalInfo = read_input(&self.personal, "personal info")?;
        let result = calculate_fund(&config.accumulation_fund, &info.salary)?;

        match format {
            OutputFormat::Json => write_json(&result, out),
            OutputFormat::Text => Ok(render(&result, out)?),
        }
    }
}

/// Writes the housing fund bounds and the month's contribution.
pub fn render(result: &FundResult, out: &mut impl Write) -> io::Result<()> {
    let bounds = &result.bounds;
    writeln!(
        out,
        "Housing fund, min base: {:.0}, max base: {:.0}, min rate: {:.2}%, max rate: {:.2}%, \
         company min: {:.0}, company max: {:.0}, private min: {:.0}, private max: {:.0}.",
        bounds.min_base,
        bounds.max_base,
        bounds.min_rate,
        bounds.max_rate,
        result.min_company_fund,
        result.max_company_fund,
        result.min_private_fund,
        result.max_private_fund,
    )?;
    writeln!(
        out,
        "\t  base: {:.0}, rate: {:.2}%, company: {:.0}, private: {:.0}",
        result.base, result.rate, result.company_fund, result.private_fund
    )
}
