//! Calculation logic for the tax engine.
//!
//! Housing fund and social insurance are computed per month from the rate
//! tables; the remainder is settled against the cumulative bracket table.

mod accumulator;
mod fund;
mod insurance;
mod monthly;
mod rounding;
mod year;

pub use accumulator::{MonthInput, SettlementResult, TaxAccumulator, find_bracket};
pub use fund::calculate_fund;
pub use insurance::{calculate_category, calculate_insurances, clamp_base, contribution};
pub use monthly::{MONTHS_PER_YEAR, calculate_monthly_taxes};
pub use rounding::{checked_percent_of, percent_of, round_to, round2};
pub use year::{calculate_year_taxes, month_accumulation_fund, month_insurance};
