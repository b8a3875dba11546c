//! Subcommands of the `tax` binary.
//!
//! Each command reads its personal input file, runs the calculation against
//! the loaded [`TaxConfig`](crate::config::TaxConfig) and writes either the
//! text report or the result as pretty JSON.

pub mod fund;
pub mod insurance;
pub mod tax;
pub mod year;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ConfigLoader;

pub use fund::FundCommand;
pub use insurance::InsuranceCommand;
pub use tax::TaxCommand;
pub use year::YearCommand;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// The result struct as pretty JSON.
    Json,
}

impl OutputFormat {
    /// `Json` when `json` is set, `Text` otherwise.
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize>(value: &T, out: &mut impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn read_input<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    ConfigLoader::load_file(path)
        .with_context(|| format!("Failed to read {}: {}", what, path.display()))
}
