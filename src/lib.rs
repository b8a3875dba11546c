//! Chinese individual income tax, social insurance and housing fund
//! calculator.
//!
//! Rate tables and the cumulative withholding brackets are loaded from a
//! YAML or JSON file (see [`config`]); personal salary inputs are loaded the
//! same way (see [`models`]). The [`calculation`] module computes monthly
//! contributions and the tax withheld each month, and [`cmd`] renders the
//! results for the `tax` binary.

#![warn(missing_docs)]

pub mod calculation;
pub mod cmd;
pub mod config;
pub mod error;
pub mod models;
