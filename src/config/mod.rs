//! Configuration loading for the tax engine.
//!
//! This module loads the global rate configuration and the per-invocation
//! personal files from YAML or JSON, choosing the format by file suffix.
//!
//! # Example
//!
//! ```no_run
//! use tax_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load_tax_config("./config/tax.yaml").unwrap();
//! println!("{} brackets", config.year_tax_rates.brackets().len());
//! ```

mod loader;
mod types;

pub use loader::{ConfigFormat, ConfigLoader};
pub use types::{
    AccumulationFundBase, InsurancesBase, RateBase, TaxBracketTable, TaxConfig, YearTaxRate,
};
